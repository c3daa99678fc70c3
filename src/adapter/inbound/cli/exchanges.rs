//! Handler for the `exchanges` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::exchange::{Endpoints, Exchange};
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct ExchangeRow {
    #[tabled(rename = "Exchange")]
    name: String,
    #[tabled(rename = "Spot")]
    spot_url: String,
    #[tabled(rename = "Derivatives")]
    derivatives_url: String,
}

/// Enabled exchanges with the endpoints they will be polled at.
fn resolved(config: &Config) -> Vec<(Exchange, Endpoints)> {
    let overrides = config.endpoint_overrides();
    config
        .enabled_exchanges()
        .into_iter()
        .map(|exchange| {
            let mut endpoints = exchange.default_endpoints();
            if let Some(endpoint) = overrides.get(&exchange) {
                endpoints = endpoints.with_override(endpoint);
            }
            (exchange, endpoints)
        })
        .collect()
}

/// Print the enabled exchanges and their listing endpoints.
pub fn execute(config: &Config) {
    let exchanges = resolved(config);

    if output::is_json() {
        let payload: Vec<_> = exchanges
            .iter()
            .map(|(exchange, endpoints)| {
                json!({
                    "name": exchange.as_str(),
                    "spot_url": endpoints.spot_url,
                    "derivatives_url": endpoints.derivatives_url,
                })
            })
            .collect();
        output::json_output(json!({ "type": "exchanges", "payload": payload }));
        return;
    }
    if output::is_quiet() {
        return;
    }

    let rows: Vec<ExchangeRow> = exchanges
        .into_iter()
        .map(|(exchange, endpoints)| ExchangeRow {
            name: exchange.to_string(),
            spot_url: endpoints.spot_url,
            derivatives_url: endpoints.derivatives_url,
        })
        .collect();

    output::header(env!("CARGO_PKG_VERSION"));
    output::lines(&Table::new(rows).to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::exchange::EndpointOverride;

    #[test]
    fn overrides_replace_only_the_given_url() {
        let mut config = Config::default();
        config.exchanges.enabled = vec!["okx".into()];
        config.exchanges.endpoints.insert(
            "okx".into(),
            EndpointOverride {
                spot_url: Some("http://127.0.0.1:9000/spot".into()),
                derivatives_url: None,
            },
        );

        let exchanges = resolved(&config);

        assert_eq!(exchanges.len(), 1);
        let (exchange, endpoints) = &exchanges[0];
        assert_eq!(*exchange, Exchange::Okx);
        assert_eq!(endpoints.spot_url, "http://127.0.0.1:9000/spot");
        assert_eq!(
            endpoints.derivatives_url,
            Exchange::Okx.default_endpoints().derivatives_url
        );
    }

    #[test]
    fn default_config_lists_all_exchanges() {
        let names: Vec<_> = resolved(&Config::default())
            .into_iter()
            .map(|(exchange, _)| exchange)
            .collect();
        assert_eq!(names, Exchange::ALL.to_vec());
    }
}
