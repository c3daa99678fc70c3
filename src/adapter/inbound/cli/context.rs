//! Config resolution and argument checks shared by handlers.

use std::path::Path;

use crate::adapter::inbound::cli::paths;
use crate::application::{Aggregator, SyncScope};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Load the configuration the CLI should run with.
///
/// An explicit path must exist. Without one, `~/.listwatch/config.toml` is
/// used when present and built-in defaults otherwise.
///
/// # Errors
/// Returns an error if the file is unreadable or invalid.
#[allow(clippy::result_large_err)]
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => Config::load_or_default(paths::default_config()),
    }
}

/// Resolve `--exchange` against the registered adapters.
///
/// # Errors
/// Returns [`ConfigError::InvalidValue`] for a name no adapter answers to.
#[allow(clippy::result_large_err)]
pub fn scope(aggregator: &Aggregator, exchange: Option<&str>) -> Result<SyncScope> {
    let Some(name) = exchange else {
        return Ok(SyncScope::All);
    };

    let wanted = name.trim().to_ascii_lowercase();
    if aggregator.contains(&wanted) {
        return Ok(SyncScope::Exchange(wanted));
    }

    Err(ConfigError::InvalidValue {
        field: "exchange",
        reason: format!(
            "'{name}' is not enabled (enabled: {})",
            aggregator.names().join(", ")
        ),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::Error;
    use crate::testkit::adapter::StaticAdapter;

    fn aggregator() -> Aggregator {
        Aggregator::new(vec![
            Arc::new(StaticAdapter::new("okx", vec![], vec![])),
            Arc::new(StaticAdapter::new("gate", vec![], vec![])),
        ])
        .unwrap()
    }

    #[test]
    fn no_exchange_means_all() {
        assert_eq!(scope(&aggregator(), None).unwrap(), SyncScope::All);
    }

    #[test]
    fn exchange_name_is_normalized() {
        assert_eq!(
            scope(&aggregator(), Some(" OKX ")).unwrap(),
            SyncScope::Exchange("okx".into())
        );
    }

    #[test]
    fn unregistered_exchange_is_rejected() {
        let err = scope(&aggregator(), Some("kraken")).unwrap_err();
        match err {
            Error::Config(ConfigError::InvalidValue { field, reason }) => {
                assert_eq!(field, "exchange");
                assert!(reason.contains("okx, gate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listwatch.toml");
        std::fs::write(&path, "[daemon]\ninterval_secs = 42\n").unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.daemon.interval_secs, 42);
    }
}
