//! Binance listing adapter.
//!
//! Spot and USDⓈ-M futures share the `exchangeInfo` envelope shape.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::http::{to_instruments, ListingClient};
use super::settings::Endpoints;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::ExchangeAdapter;

pub const NAME: &str = "binance";
pub const SPOT_URL: &str = "https://api.binance.com/api/v3/exchangeInfo";
pub const DERIVATIVES_URL: &str = "https://fapi.binance.com/fapi/v1/exchangeInfo";

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Deserialize)]
struct SymbolEntry {
    symbol: String,
}

impl ExchangeInfo {
    fn into_symbols(self) -> Vec<String> {
        self.symbols.into_iter().map(|s| s.symbol).collect()
    }
}

/// Binance spot + futures listings.
pub struct BinanceAdapter {
    client: ListingClient,
    endpoints: Endpoints,
}

impl BinanceAdapter {
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
        let info: ExchangeInfo = self.client.get_json(url, NAME, kind).await?;
        let instruments = to_instruments(NAME, kind, info.into_symbols());
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }
}

#[async_trait]
impl ExchangeAdapter for BinanceAdapter {
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
