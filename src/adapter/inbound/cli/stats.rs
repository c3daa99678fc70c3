//! Handler for the `stats` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::StoreStats;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::InstrumentStore;

#[derive(Tabled)]
struct ExchangeRow {
    #[tabled(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Instruments")]
    count: u64,
}

/// Print stored instrument totals for the enabled exchanges.
pub async fn execute(config: &Config) -> Result<()> {
    let store = bootstrap::open_store(config)?;
    let stats = store.stats(&config.exchanges.enabled).await?;

    if output::is_json() {
        output::json_output(json!({ "type": "stats", "payload": stats }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &config.database);
    output::field("Total", output::highlight(stats.total));
    output::field("Spot", stats.spot);
    output::field("Derivatives", stats.derivative);

    output::section("By exchange");
    output::lines(&exchange_table(&stats));
    Ok(())
}

fn exchange_table(stats: &StoreStats) -> String {
    let rows: Vec<ExchangeRow> = stats
        .by_exchange
        .iter()
        .map(|(exchange, count)| ExchangeRow {
            exchange: exchange.clone(),
            count: *count,
        })
        .collect();
    Table::new(rows).to_string()
}
