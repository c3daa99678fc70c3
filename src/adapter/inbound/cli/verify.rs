//! Handler for the `verify` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::VerifyArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::application::SyncScope;
use crate::domain::ReconciliationResult;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Symbols shown per category below the table.
const PREVIEW: usize = 10;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "API")]
    api: usize,
    #[tabled(rename = "Stored")]
    stored: usize,
    #[tabled(rename = "New")]
    new: usize,
    #[tabled(rename = "Missing")]
    missing: usize,
    #[tabled(rename = "Common")]
    common: usize,
    #[tabled(rename = "Change")]
    change: String,
}

impl From<&ReconciliationResult> for ResultRow {
    fn from(result: &ReconciliationResult) -> Self {
        Self {
            exchange: result.exchange.clone(),
            kind: result.kind.to_string(),
            api: result.api_count,
            stored: result.db_count,
            new: result.new_in_api.len(),
            missing: result.missing_in_api.len(),
            common: result.common.len(),
            change: format!("{:.2}%", result.change_rate()),
        }
    }
}

/// Compare live listings with the store and print the differences.
pub async fn execute(config: &Config, args: &VerifyArgs) -> Result<()> {
    let service = bootstrap::build_verify_service(config)?;
    let scope = context::scope(service.aggregator(), args.exchange.as_deref())?;
    let exchange = match &scope {
        SyncScope::All => None,
        SyncScope::Exchange(name) => Some(name.as_str()),
    };

    let results = service.run(exchange).await;

    if output::is_json() {
        output::json_output(json!({ "type": "verify", "payload": results }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if results.is_empty() {
        output::warning("Nothing to compare: no exchange returned listings");
        return Ok(());
    }

    output::lines(&result_table(&results));
    for result in results.iter().filter(|r| !r.is_in_sync()) {
        output::section(&format!("{} {}", result.exchange, result.kind));
        if !result.new_in_api.is_empty() {
            output::field("Not stored", preview(&result.new_in_api));
        }
        if !result.missing_in_api.is_empty() {
            output::field("Not listed", preview(&result.missing_in_api));
        }
    }
    if results.iter().all(ReconciliationResult::is_in_sync) {
        output::success("Store matches every listing");
    }
    Ok(())
}

fn result_table(results: &[ReconciliationResult]) -> String {
    let rows: Vec<ResultRow> = results.iter().map(ResultRow::from).collect();
    Table::new(rows).to_string()
}

fn preview(symbols: &[String]) -> String {
    let shown = symbols
        .iter()
        .take(PREVIEW)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match symbols.len().checked_sub(PREVIEW) {
        Some(rest) if rest > 0 => format!("{shown} (+{rest})"),
        _ => shown,
    }
}
