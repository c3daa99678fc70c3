//! Exchange adapter configuration.

use serde::Deserialize;

/// Outbound HTTP client settings shared by all exchange adapters.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds. Unset means no timeout.
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!("listwatch/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            connect_timeout_ms: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Listing endpoints for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub spot_url: String,
    pub derivatives_url: String,
}

impl Endpoints {
    pub fn new(spot_url: impl Into<String>, derivatives_url: impl Into<String>) -> Self {
        Self {
            spot_url: spot_url.into(),
            derivatives_url: derivatives_url.into(),
        }
    }

    /// Replace whichever URLs the override sets.
    #[must_use]
    pub fn with_override(mut self, endpoint: &EndpointOverride) -> Self {
        if let Some(url) = &endpoint.spot_url {
            self.spot_url.clone_from(url);
        }
        if let Some(url) = &endpoint.derivatives_url {
            self.derivatives_url.clone_from(url);
        }
        self
    }
}

/// Per-exchange endpoint override from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EndpointOverride {
    #[serde(default)]
    pub spot_url: Option<String>,
    #[serde(default)]
    pub derivatives_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_only_set_urls() {
        let endpoints = Endpoints::new("https://a/spot", "https://a/perp");
        let endpoint = EndpointOverride {
            spot_url: Some("http://127.0.0.1:9000/spot".into()),
            derivatives_url: None,
        };

        let merged = endpoints.with_override(&endpoint);

        assert_eq!(merged.spot_url, "http://127.0.0.1:9000/spot");
        assert_eq!(merged.derivatives_url, "https://a/perp");
    }

    #[test]
    fn http_defaults_have_no_timeout() {
        let config: HttpConfig = toml::from_str("").unwrap();
        assert!(config.timeout_ms.is_none());
        assert!(config.user_agent.starts_with("listwatch/"));
    }
}
