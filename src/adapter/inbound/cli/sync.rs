//! Handler for the `sync` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::SyncArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::application::SyncOptions;
use crate::domain::{Instrument, SyncReport};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// New instruments listed individually before collapsing the rest.
const LISTED_NEW: usize = 20;

#[derive(Tabled)]
struct FetchedRow {
    #[tabled(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Fetched")]
    count: usize,
}

/// Execute one sync run and print its report.
pub async fn execute(config: &Config, args: &SyncArgs) -> Result<()> {
    let service = bootstrap::build_sync_service(config, SyncOptions::one_shot())?;
    let scope = context::scope(service.aggregator(), args.exchange.as_deref())?;

    let report = service.run(&scope).await?;

    if output::is_json() {
        output::json_output(report_json(&report));
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn report_json(report: &SyncReport) -> serde_json::Value {
    let breakdown: Vec<_> = report
        .breakdown
        .iter()
        .map(|((exchange, kind), count)| {
            json!({ "exchange": exchange, "kind": kind, "count": count })
        })
        .collect();

    json!({
        "type": "sync",
        "payload": {
            "fetched": report.fetched,
            "new": report.new_count(),
            "inserted": report.inserted,
            "elapsed_ms": report.elapsed.as_millis() as u64,
            "breakdown": breakdown,
            "new_instruments": report.new_instruments,
        }
    })
}

fn print_report(report: &SyncReport) {
    if output::is_quiet() {
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Fetched", report.fetched);
    output::field("New", output::highlight(report.new_count()));
    output::field("Inserted", report.inserted);
    output::field("Elapsed", format!("{:.2}s", report.elapsed.as_secs_f64()));

    if !report.breakdown.is_empty() {
        let rows: Vec<FetchedRow> = report
            .breakdown
            .iter()
            .map(|((exchange, kind), count)| FetchedRow {
                exchange: exchange.clone(),
                kind: kind.to_string(),
                count: *count,
            })
            .collect();
        output::section("Fetched");
        output::lines(&Table::new(rows).to_string());
    }

    if report.has_new() {
        output::section("New instruments");
        output::lines(&new_listing(&report.new_instruments));
    } else {
        output::success("All markets are up to date");
    }
}

fn new_listing(instruments: &[Instrument]) -> String {
    let mut listing: Vec<String> = instruments
        .iter()
        .take(LISTED_NEW)
        .map(|i| format!("{:<8} {:<10} {}", i.exchange(), i.kind().as_str(), i.symbol()))
        .collect();
    if instruments.len() > LISTED_NEW {
        listing.push(format!("… and {} more", instruments.len() - LISTED_NEW));
    }
    listing.join("\n")
}
