//! Exchange selection and endpoint overrides.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::adapter::outbound::exchange::{EndpointOverride, Exchange};

/// `[exchanges]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesConfig {
    /// Exchanges to poll, in registration order.
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
    /// Endpoint overrides keyed by exchange name.
    #[serde(default)]
    pub endpoints: BTreeMap<String, EndpointOverride>,
}

fn default_enabled() -> Vec<String> {
    Exchange::ALL.iter().map(|e| e.as_str().to_string()).collect()
}

impl Default for ExchangesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoints: BTreeMap::new(),
        }
    }
}
