//! Shared HTTP plumbing for listing endpoints.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::settings::HttpConfig;
use crate::domain::{Instrument, InstrumentKind};
use crate::error::{FetchError, FetchFailure};

/// HTTP client for unauthenticated JSON listing endpoints.
///
/// Cheap to clone; all adapters share one connection pool.
#[derive(Debug, Clone)]
pub struct ListingClient {
    http: HttpClient,
}

impl ListingClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let mut builder = HttpClient::builder().user_agent(config.user_agent.clone());
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }

        let http = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            HttpClient::new()
        });

        Self { http }
    }

    /// GET `url` once and decode the JSON body.
    ///
    /// Non-success status codes, transport errors, and undecodable bodies all
    /// become a [`FetchError`] tagged with `exchange` and `kind`.
    pub async fn get_json<T>(
        &self,
        url: &str,
        exchange: &str,
        kind: InstrumentKind,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        debug!(exchange, %kind, url, "Requesting listing");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FetchError::new(exchange, kind, e))?;

        debug!(exchange, %kind, status = %response.status(), "Listing response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::new(exchange, kind, e))?;

        decode(&body).map_err(|e| FetchError::new(exchange, kind, e))
    }
}

impl Default for ListingClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a JSON body.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchFailure> {
    serde_json::from_slice(body).map_err(FetchFailure::from)
}

/// Map listed symbols to instruments sharing one observation timestamp.
pub(crate) fn to_instruments<I>(
    exchange: &str,
    kind: InstrumentKind,
    symbols: I,
) -> Vec<Instrument>
where
    I: IntoIterator<Item = String>,
{
    let observed_at = Utc::now();
    symbols
        .into_iter()
        .map(|symbol| Instrument::with_observed_at(exchange, kind, symbol, observed_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_instruments_sets_kind_and_shared_timestamp() {
        let instruments = to_instruments(
            "gate",
            InstrumentKind::Derivative,
            vec!["BTC_USDT".to_string(), "ETH_USDT".to_string()],
        );

        assert_eq!(instruments.len(), 2);
        assert!(instruments
            .iter()
            .all(|i| i.kind() == InstrumentKind::Derivative && i.exchange() == "gate"));
        assert_eq!(instruments[0].observed_at(), instruments[1].observed_at());
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let result: Result<Vec<String>, _> = decode(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(FetchFailure::Decode(_))));
    }
}
