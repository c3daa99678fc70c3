//! Configuration file loading.

use std::fs;

use listwatch::adapter::outbound::exchange::Exchange;
use listwatch::error::{ConfigError, Error};
use listwatch::infrastructure::config::settings::{Config, DATABASE_ENV};

#[test]
fn example_config_parses() {
    let content = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml"))
        .expect("read example config");

    let config = Config::parse_toml(&content).expect("example config is valid");

    assert_eq!(config.enabled_exchanges(), Exchange::ALL.to_vec());
    assert_eq!(config.daemon.interval_secs, 5);
    assert_eq!(config.telegram.enabled, None);
}

#[test]
fn file_on_disk_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listwatch.toml");
    fs::write(
        &path,
        concat!(
            "[logging]\n",
            "format = \"json\"\n",
            "\n",
            "[exchanges]\n",
            "enabled = [\"bybit\"]\n",
            "\n",
            "[exchanges.endpoints.bybit]\n",
            "derivatives_url = \"http://localhost:8080/linear\"\n",
        ),
    )
    .unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.enabled_exchanges(), vec![Exchange::Bybit]);
    assert_eq!(
        config.endpoint_overrides()[&Exchange::Bybit]
            .derivatives_url
            .as_deref(),
        Some("http://localhost:8080/linear")
    );
}

#[test]
fn invalid_file_reports_the_offending_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listwatch.toml");
    fs::write(&path, "[exchanges]\nenabled = [\"binance\", \"mexc\"]\n").unwrap();

    let err = Config::load(&path).unwrap_err();

    assert!(
        matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "exchanges.enabled",
                ..
            })
        ),
        "unexpected error: {err:?}"
    );
    assert!(err.to_string().contains("mexc"));
}

#[test]
fn database_path_comes_from_environment() {
    std::env::set_var(DATABASE_ENV, "/tmp/listwatch-env.db");
    let config = Config::parse_toml("database = \"from-file.db\"\n");
    std::env::remove_var(DATABASE_ENV);

    assert_eq!(config.unwrap().database, "/tmp/listwatch-env.db");
}
