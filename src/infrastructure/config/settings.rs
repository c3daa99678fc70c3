//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for the database path and the Telegram credentials.
//!
//! # Example
//!
//! ```no_run
//! use listwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("listwatch.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::daemon::DaemonConfig;
use super::exchanges::ExchangesConfig;
use super::logging::{LoggingConfig, FORMATS};
use super::telegram::TelegramAppConfig;
use crate::adapter::outbound::exchange::{EndpointOverride, Exchange, HttpConfig};
use crate::error::{ConfigError, Result};

/// Environment variable that overrides [`Config::database`].
pub const DATABASE_ENV: &str = "LISTWATCH_DATABASE";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "listwatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Daemon loop settings.
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Outbound HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Exchange selection and endpoint overrides.
    #[serde(default)]
    pub exchanges: ExchangesConfig,
}

fn default_database_path() -> String {
    "listwatch.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            daemon: DaemonConfig::default(),
            http: HttpConfig::default(),
            telegram: TelegramAppConfig::default(),
            exchanges: ExchangesConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` when it exists, otherwise fall back to defaults.
    ///
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable or invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        Self::parse_toml("")
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.daemon.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of: {}", FORMATS.join(", ")),
            }
            .into());
        }
        if self.http.timeout_ms == Some(0) || self.http.connect_timeout_ms == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "http",
                reason: "timeouts must be greater than 0 when set".to_string(),
            }
            .into());
        }

        if self.exchanges.enabled.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "exchanges.enabled",
                reason: "at least one exchange must be enabled".to_string(),
            }
            .into());
        }
        let mut seen = HashSet::new();
        for name in &self.exchanges.enabled {
            let exchange = parse_exchange("exchanges.enabled", name)?;
            if !seen.insert(exchange) {
                return Err(ConfigError::InvalidValue {
                    field: "exchanges.enabled",
                    reason: format!("'{exchange}' is listed twice"),
                }
                .into());
            }
        }

        for (name, endpoint) in &self.exchanges.endpoints {
            parse_exchange("exchanges.endpoints", name)?;
            for url in [&endpoint.spot_url, &endpoint.derivatives_url]
                .into_iter()
                .flatten()
            {
                Url::parse(url).map_err(|e| ConfigError::InvalidValue {
                    field: "exchanges.endpoints",
                    reason: format!("{name}: invalid url '{url}': {e}"),
                })?;
            }
        }

        Ok(())
    }

    /// Enabled exchanges in configured order.
    ///
    /// Names that fail to parse are skipped; [`Config::parse_toml`] already
    /// rejects them.
    #[must_use]
    pub fn enabled_exchanges(&self) -> Vec<Exchange> {
        self.exchanges
            .enabled
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// Endpoint overrides keyed by exchange.
    #[must_use]
    pub fn endpoint_overrides(&self) -> HashMap<Exchange, EndpointOverride> {
        self.exchanges
            .endpoints
            .iter()
            .filter_map(|(name, endpoint)| Some((name.parse().ok()?, endpoint.clone())))
            .collect()
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[allow(clippy::result_large_err)]
fn parse_exchange(field: &'static str, name: &str) -> Result<Exchange> {
    name.parse::<Exchange>()
        .map_err(|reason| ConfigError::InvalidValue { field, reason }.into())
}
