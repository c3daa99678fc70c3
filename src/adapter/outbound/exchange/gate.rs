//! Gate listing adapter.
//!
//! Both endpoints return a bare JSON array. Spot pairs are keyed by `id`,
//! USDT-settled futures contracts by `name`.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::http::{to_instruments, ListingClient};
use super::settings::Endpoints;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::ExchangeAdapter;

pub const NAME: &str = "gate";
pub const SPOT_URL: &str = "https://api.gateio.ws/api/v4/spot/currency_pairs";
pub const DERIVATIVES_URL: &str = "https://api.gateio.ws/api/v4/futures/usdt/contracts";

#[derive(Debug, Deserialize)]
struct CurrencyPair {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FuturesContract {
    name: String,
}

/// Gate spot + USDT futures listings.
pub struct GateAdapter {
    client: ListingClient,
    endpoints: Endpoints,
}

impl GateAdapter {
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
}

#[async_trait]
impl ExchangeAdapter for GateAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError> {
        let kind = InstrumentKind::Spot;
        let pairs: Vec<CurrencyPair> = self
            .client
            .get_json(&self.endpoints.spot_url, NAME, kind)
            .await?;
        let instruments = to_instruments(NAME, kind, pairs.into_iter().map(|p| p.id));
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }

    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError> {
        let kind = InstrumentKind::Derivative;
        let contracts: Vec<FuturesContract> = self
            .client
            .get_json(&self.endpoints.derivatives_url, NAME, kind)
            .await?;
        let instruments = to_instruments(NAME, kind, contracts.into_iter().map(|c| c.name));
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }
}

#[cfg(test)]
mod tests {
    use super::super::http::decode;
    use super::*;

    #[test]
    fn parses_spot_pairs_by_id() {
        let body = br#"[
            {"id": "BTC_USDT", "base": "BTC", "quote": "USDT", "trade_status": "tradable"},
            {"id": "OLD_USDT", "base": "OLD", "quote": "USDT", "trade_status": "untradable"}
        ]"#;

        let pairs: Vec<CurrencyPair> = decode(body).unwrap();
        let ids: Vec<_> = pairs.into_iter().map(|p| p.id).collect();

        assert_eq!(ids, vec!["BTC_USDT", "OLD_USDT"]);
    }

    #[test]
    fn parses_contracts_by_name() {
        let body = br#"[
            {"name": "BTC_USDT", "type": "direct", "quanto": false, "in_delisting": false},
            {"name": "XYZ_USDT", "type": "direct", "quanto": false, "in_delisting": true}
        ]"#;

        let contracts: Vec<FuturesContract> = decode(body).unwrap();

        assert_eq!(contracts.len(), 2);
        assert_eq!(contracts[1].name, "XYZ_USDT");
    }

    #[test]
    fn error_object_is_unparsable() {
        let body = br#"{"label": "INVALID_PARAM_VALUE", "message": "invalid settle"}"#;
        assert!(decode::<Vec<FuturesContract>>(body).is_err());
    }
}
