//! OKX listing adapter (SPOT and SWAP instrument types).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::http::{to_instruments, ListingClient};
use super::settings::Endpoints;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::ExchangeAdapter;

pub const NAME: &str = "okx";
pub const SPOT_URL: &str = "https://www.okx.com/api/v5/public/instruments?instType=SPOT";
pub const DERIVATIVES_URL: &str = "https://www.okx.com/api/v5/public/instruments?instType=SWAP";

const SUCCESS_CODE: &str = "0";

#[derive(Debug, Deserialize)]
struct InstrumentsResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<OkxInstrument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OkxInstrument {
    inst_id: String,
}

impl InstrumentsResponse {
    fn into_symbols(self, kind: InstrumentKind) -> Result<Vec<String>, FetchError> {
        match self.code {
            Some(code) if code != SUCCESS_CODE => {
                Err(FetchError::api(NAME, kind, code, self.msg))
            }
            _ => Ok(self.data.into_iter().map(|i| i.inst_id).collect()),
        }
    }
}

/// OKX spot + perpetual swap listings.
pub struct OkxAdapter {
    client: ListingClient,
    endpoints: Endpoints,
}

impl OkxAdapter {
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
        let response: InstrumentsResponse = self.client.get_json(url, NAME, kind).await?;
        let instruments = to_instruments(NAME, kind, response.into_symbols(kind)?);
        info!(exchange = NAME, %kind, count = instruments.len(), "Listing fetched");
        Ok(instruments)
    }
}

#[async_trait]
impl ExchangeAdapter for OkxAdapter {
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

#[cfg(test)]
mod tests {
    use super::super::http::decode;
    use super::*;
    use crate::error::FetchFailure;

    #[test]
    fn parses_inst_ids() {
        let body = br#"{
            "code": "0",
            "msg": "",
            "data": [
                {"instType": "SWAP", "instId": "BTC-USDT-SWAP", "state": "live"},
                {"instType": "SWAP", "instId": "ETH-USD-SWAP", "state": "suspend"}
            ]
        }"#;

        let response: InstrumentsResponse = decode(body).unwrap();
        let symbols = response.into_symbols(InstrumentKind::Derivative).unwrap();

        assert_eq!(symbols, vec!["BTC-USDT-SWAP", "ETH-USD-SWAP"]);
    }

    #[test]
    fn non_zero_code_is_an_api_error() {
        let body = br#"{"code": "50011", "msg": "Rate limit reached", "data": []}"#;

        let response: InstrumentsResponse = decode(body).unwrap();
        let err = response.into_symbols(InstrumentKind::Spot).unwrap_err();

        assert_eq!(err.exchange, "okx");
        match err.source {
            FetchFailure::Api { code, message } => {
                assert_eq!(code, "50011");
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn empty_data_is_not_an_error() {
        let response: InstrumentsResponse = decode(br#"{"code":"0","msg":"","data":[]}"#).unwrap();
        assert!(response
            .into_symbols(InstrumentKind::Spot)
            .unwrap()
            .is_empty());
    }
}
