//! Handler for the `daemon` command.

use std::time::Duration;

use serde_json::json;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::adapter::inbound::cli::command::DaemonArgs;
use crate::adapter::inbound::cli::{context, output};
use crate::application::SyncOptions;
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Poll until the process is interrupted.
///
/// Runs are serialized: each tick awaits the previous run, and ticks missed
/// while a run was in flight are delayed rather than bursted. A failed run
/// is logged and the loop continues.
pub async fn execute(config: &Config, args: &DaemonArgs) -> Result<()> {
    let period = resolve_interval(config, args.interval)?;
    let service = bootstrap::build_sync_service(config, SyncOptions::daemon())?;
    let scope = context::scope(service.aggregator(), args.exchange.as_deref())?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Scope", &scope);
    output::field("Interval", format!("{}s", period.as_secs()));
    output::field("Exchanges", service.aggregator().names().join(", "));
    info!(scope = %scope, interval_secs = period.as_secs(), "Daemon started");

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut run: u64 = 0;
    loop {
        ticker.tick().await;
        run += 1;

        match service.run(&scope).await {
            Ok(report) if report.has_new() => {
                if output::is_json() {
                    output::json_output(json!({
                        "type": "new_instruments",
                        "payload": {
                            "run": run,
                            "instruments": report.new_instruments,
                        }
                    }));
                } else {
                    output::success(&format!(
                        "run {run}: {} new of {} fetched",
                        report.new_count(),
                        report.fetched
                    ));
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(run, error = %e, "Sync run failed");
                output::warning(&format!("run {run} failed: {e}"));
            }
        }
    }
}

#[allow(clippy::result_large_err)]
fn resolve_interval(config: &Config, flag: Option<u64>) -> Result<Duration> {
    match flag {
        Some(0) => Err(ConfigError::InvalidValue {
            field: "interval",
            reason: "must be greater than 0".to_string(),
        }
        .into()),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(config.daemon.interval()),
    }
}
