//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! Turns a validated [`Config`] into ready-to-run services.

use std::sync::Arc;

use tracing::{info, warn};

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::exchange::{ExchangeFactory, ListingClient};
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::SqliteInstrumentStore;
use crate::application::{Aggregator, SyncOptions, SyncService, VerifyService};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::{LogNotifier, NotifierRegistry};

/// Build the aggregator over every enabled exchange.
///
/// # Errors
/// Returns an error if an adapter name is rejected by the aggregator.
pub fn build_aggregator(config: &Config) -> Result<Aggregator> {
    let client = ListingClient::from_config(&config.http);
    let adapters = ExchangeFactory::create_all(
        &config.enabled_exchanges(),
        &client,
        &config.endpoint_overrides(),
    );
    info!(exchanges = ?config.exchanges.enabled, "Exchange adapters registered");
    Aggregator::new(adapters)
}

/// Open the SQLite store and apply pending migrations.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated.
pub fn open_store(config: &Config) -> Result<Arc<SqliteInstrumentStore>> {
    let pool = connection::open(&config.database)?;
    info!(database = %config.database, "Instrument store ready");
    Ok(Arc::new(SqliteInstrumentStore::new(pool)))
}

/// Build notifier registry from configuration.
///
/// Always includes the log notifier. Telegram is added when credentials are
/// present in the environment and the config does not switch it off.
#[cfg(feature = "telegram")]
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    notifier_registry(config, TelegramConfig::from_env())
}

#[cfg(feature = "telegram")]
fn notifier_registry(config: &Config, credentials: Option<TelegramConfig>) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    if config.telegram.is_disabled() {
        info!("Telegram disabled in config");
        return registry;
    }

    match credentials {
        Some(tg_config) => {
            registry.register(Box::new(TelegramNotifier::new(tg_config)));
        }
        None if config.telegram.is_required() => {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
        }
        None => {
            info!("Telegram credentials not set, skipping chat notifications");
        }
    }

    registry
}

/// Build notifier registry from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    if config.telegram.is_required() {
        warn!("Telegram enabled in config but this build has no telegram support");
    }
    registry
}

/// Wire a [`SyncService`] backed by SQLite.
///
/// # Errors
/// Returns an error if the store cannot be opened.
pub fn build_sync_service(
    config: &Config,
    options: SyncOptions,
) -> Result<SyncService<SqliteInstrumentStore>> {
    Ok(SyncService::new(
        build_aggregator(config)?,
        open_store(config)?,
        build_notifier_registry(config),
        options,
    ))
}

/// Wire a [`VerifyService`] backed by SQLite.
///
/// # Errors
/// Returns an error if the store cannot be opened.
pub fn build_verify_service(config: &Config) -> Result<VerifyService<SqliteInstrumentStore>> {
    Ok(VerifyService::new(build_aggregator(config)?, open_store(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::InstrumentStore;

    fn config_with_db(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.database = dir.path().join("bootstrap.db").display().to_string();
        config
    }

    #[test]
    fn aggregator_registers_enabled_exchanges_in_order() {
        let mut config = Config::default();
        config.exchanges.enabled = vec!["bybit".into(), "okx".into()];

        let aggregator = build_aggregator(&config).unwrap();

        assert_eq!(aggregator.names(), vec!["bybit", "okx"]);
    }

    #[test]
    fn default_aggregator_has_all_exchanges() {
        let aggregator = build_aggregator(&Config::default()).unwrap();
        assert_eq!(
            aggregator.names(),
            vec!["binance", "okx", "gate", "bitget", "bybit"]
        );
    }

    #[test]
    fn registry_always_has_log_notifier() {
        let registry = build_notifier_registry(&Config::default());
        assert!(!registry.is_empty());
    }

    #[cfg(feature = "telegram")]
    fn credentials() -> Option<TelegramConfig> {
        TelegramConfig::from_values(Some("123:token".into()), Some("-100123".into()))
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn credentials_add_telegram_when_flag_unset() {
        let registry = notifier_registry(&Config::default(), credentials());
        assert_eq!(registry.len(), 2);
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn disabled_flag_wins_over_credentials() {
        let mut config = Config::default();
        config.telegram.enabled = Some(false);

        let registry = notifier_registry(&config, credentials());

        assert_eq!(registry.len(), 1);
    }

    #[cfg(feature = "telegram")]
    #[test]
    fn required_flag_without_credentials_keeps_log_only() {
        let mut config = Config::default();
        config.telegram.enabled = Some(true);

        let registry = notifier_registry(&config, None);

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn open_store_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(&dir);

        let store = open_store(&config).unwrap();

        assert!(dir.path().join("bootstrap.db").exists());
        let stats = store.stats(&[]).await.unwrap();
        assert_eq!(stats.total, 0);
    }
}
