//! Bitget listing adapter (spot products and USDT-M mix contracts).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::http::{to_instruments, ListingClient};
use super::settings::Endpoints;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::ExchangeAdapter;

pub const NAME: &str = "bitget";
pub const SPOT_URL: &str = "https://api.bitget.com/api/spot/v1/public/products";
pub const DERIVATIVES_URL: &str =
    "https://api.bitget.com/api/mix/v1/market/contracts?productType=umcbl";

const SUCCESS_CODE: &str = "00000";

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Option<Vec<Product>>,
}

#[derive(Debug, Deserialize)]
struct Product {
    symbol: String,
}

impl ProductsResponse {
    fn into_symbols(self, kind: InstrumentKind) -> Result<Vec<String>, FetchError> {
        if let Some(code) = self.code {
            if code != SUCCESS_CODE {
                return Err(FetchError::api(NAME, kind, code, self.msg));
            }
        }
        Ok(self
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.symbol)
            .collect())
    }
}

/// Bitget spot + USDT-M futures listings.
pub struct BitgetAdapter {
    client: ListingClient,
    endpoints: Endpoints,
}

impl BitgetAdapter {
    #[must_use]
    pub fn new(client: ListingClient) -> Self {
        Self::with_endpoints(client, Self::default_endpoints())
    }

    #[must_use]
    pub fn with_endpoints(client: ListingClient, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    #[must_use]
    pub fn default_endpoints() -> Endpoints {
        Endpoints::new(SPOT_URL, DERIVATIVES_URL)
    }

    async fn fetch_listing(
        &self,
        url: &str,
        kind: InstrumentKind,
    ) -> Result<Vec<Instrument>, FetchError> {
        let response: ProductsResponse = self.client.get_json(url, NAME, kind).await?;
        let instruments = to_instruments(NAME, kind, response.into_symbols(kind)?);
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }
}

#[async_trait]
impl ExchangeAdapter for BitgetAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError> {
        self.fetch_listing(&self.endpoints.spot_url, InstrumentKind::Spot)
            .await
    }

    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError> {
        self.fetch_listing(&self.endpoints.derivatives_url, InstrumentKind::Derivative)
            .await
    }
}
