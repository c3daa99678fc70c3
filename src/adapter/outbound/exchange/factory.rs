//! Exchange adapter factory.
//!
//! Creates exchange-specific adapters from configuration.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use super::settings::{EndpointOverride, Endpoints};
use super::{
    binance::BinanceAdapter, bitget::BitgetAdapter, bybit::BybitAdapter, gate::GateAdapter,
    http::ListingClient, okx::OkxAdapter,
};
use crate::port::ExchangeAdapter;

/// Supported exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Okx,
    Gate,
    Bitget,
    Bybit,
}

impl Exchange {
    /// Every supported exchange, in registration order.
    pub const ALL: [Self; 5] = [
        Self::Binance,
        Self::Okx,
        Self::Gate,
        Self::Bitget,
        Self::Bybit,
    ];

    /// Adapter name, also the `exchange` field of produced instruments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binance => super::binance::NAME,
            Self::Okx => super::okx::NAME,
            Self::Gate => super::gate::NAME,
            Self::Bitget => super::bitget::NAME,
            Self::Bybit => super::bybit::NAME,
        }
    }

    /// Built-in listing endpoints.
    #[must_use]
    pub fn default_endpoints(self) -> Endpoints {
        match self {
            Self::Binance => BinanceAdapter::default_endpoints(),
            Self::Okx => OkxAdapter::default_endpoints(),
            Self::Gate => GateAdapter::default_endpoints(),
            Self::Bitget => BitgetAdapter::default_endpoints(),
            Self::Bybit => BybitAdapter::default_endpoints(),
        }
    }

    /// Names of all supported exchanges.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|e| e.as_str()).collect()
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown exchange '{s}' (expected one of: {})",
                    Self::names().join(", ")
                )
            })
    }
}

/// Factory for creating exchange adapters.
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create the adapter for one exchange.
    #[must_use]
    pub fn create(
        exchange: Exchange,
        client: ListingClient,
        endpoints: Endpoints,
    ) -> Arc<dyn ExchangeAdapter> {
        match exchange {
            Exchange::Binance => Arc::new(BinanceAdapter::with_endpoints(client, endpoints)),
            Exchange::Okx => Arc::new(OkxAdapter::with_endpoints(client, endpoints)),
            Exchange::Gate => Arc::new(GateAdapter::with_endpoints(client, endpoints)),
            Exchange::Bitget => Arc::new(BitgetAdapter::with_endpoints(client, endpoints)),
            Exchange::Bybit => Arc::new(BybitAdapter::with_endpoints(client, endpoints)),
        }
    }

    /// Create adapters for `enabled`, applying endpoint overrides.
    #[must_use]
    pub fn create_all(
        enabled: &[Exchange],
        client: &ListingClient,
        overrides: &HashMap<Exchange, EndpointOverride>,
    ) -> Vec<Arc<dyn ExchangeAdapter>> {
        enabled
            .iter()
            .map(|&exchange| {
                let mut endpoints = exchange.default_endpoints();
                if let Some(endpoint) = overrides.get(&exchange) {
                    endpoints = endpoints.with_override(endpoint);
                }
                Self::create(exchange, client.clone(), endpoints)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_exchange_name;

    #[test]
    fn names_are_valid_fingerprint_components() {
        for exchange in Exchange::ALL {
            let name = exchange.as_str();
            assert_eq!(validate_exchange_name(name), Ok(()), "{name}");
        }
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Binance".parse::<Exchange>(), Ok(Exchange::Binance));
        assert_eq!(" okx ".parse::<Exchange>(), Ok(Exchange::Okx));
        let err = "kraken".parse::<Exchange>().unwrap_err();
        assert!(err.contains("bybit"));
    }

    #[test]
    fn created_adapter_names_match_exchange() {
        let client = ListingClient::new();
        for exchange in Exchange::ALL {
            let adapter =
                ExchangeFactory::create(exchange, client.clone(), exchange.default_endpoints());
            assert_eq!(adapter.name(), exchange.as_str());
        }
    }

    #[test]
    fn create_all_keeps_enabled_order() {
        let client = ListingClient::new();
        let adapters = ExchangeFactory::create_all(
            &[Exchange::Bybit, Exchange::Gate],
            &client,
            &HashMap::new(),
        );
        let names: Vec<_> = adapters.iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, vec!["bybit", "gate"]);
    }
}
