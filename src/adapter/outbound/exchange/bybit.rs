//! Bybit v5 listing adapter (spot and linear categories).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use super::http::{to_instruments, ListingClient};
use super::settings::Endpoints;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::ExchangeAdapter;

pub const NAME: &str = "bybit";
pub const SPOT_URL: &str = "https://api.bybit.com/v5/market/instruments-info?category=spot";
/// Linear listings are paginated at 500 by default; 1000 is the API maximum.
pub const DERIVATIVES_URL: &str =
    "https://api.bybit.com/v5/market/instruments-info?category=linear&limit=1000";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentsInfoResponse {
    #[serde(default)]
    ret_code: Option<i64>,
    #[serde(default)]
    ret_msg: String,
    #[serde(default)]
    result: Option<InstrumentsInfoResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentsInfoResult {
    #[serde(default)]
    list: Vec<BybitInstrument>,
    #[serde(default)]
    next_page_cursor: String,
}

#[derive(Debug, Deserialize)]
struct BybitInstrument {
    symbol: String,
}

impl InstrumentsInfoResponse {
    fn into_symbols(self, kind: InstrumentKind) -> Result<Vec<String>, FetchError> {
        if let Some(code) = self.ret_code {
            if code != 0 {
                return Err(FetchError::api(NAME, kind, code.to_string(), self.ret_msg));
            }
        }

        let result = self.result.unwrap_or_default();
        if !result.next_page_cursor.is_empty() {
            warn!(
                exchange = NAME,
                %kind,
                listed = result.list.len(),
                "Listing truncated by pagination"
            );
        }
        Ok(result.list.into_iter().map(|i| i.symbol).collect())
    }
}

/// Bybit spot + linear perpetual listings.
pub struct BybitAdapter {
    client: ListingClient,
    endpoints: Endpoints,
}

impl BybitAdapter {
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
        let response: InstrumentsInfoResponse = self.client.get_json(url, NAME, kind).await?;
        let instruments = to_instruments(NAME, kind, response.into_symbols(kind)?);
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }
}

#[async_trait]
impl ExchangeAdapter for BybitAdapter {
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
