//! Listing versus store comparison per exchange and kind.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{Instrument, InstrumentKind, ReconciliationResult};
use crate::port::outbound::store::InstrumentStore;

use super::aggregator::Aggregator;
use super::reconciler::Reconciler;

/// Symbols printed per category in the log.
const LOG_SYMBOL_LIMIT: usize = 15;

/// Compares live listings against the store without writing anything.
pub struct VerifyService<S> {
    aggregator: Aggregator,
    reconciler: Reconciler<S>,
}

impl<S: InstrumentStore> VerifyService<S> {
    pub fn new(aggregator: Aggregator, store: Arc<S>) -> Self {
        Self {
            aggregator,
            reconciler: Reconciler::new(store),
        }
    }

    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Compare one exchange, or every registered exchange when `exchange` is
    /// `None`.
    ///
    /// Exchanges that return nothing are skipped, as are kinds with an empty
    /// listing. A comparison whose stored side cannot be read is logged and
    /// left out while the others proceed.
    pub async fn run(&self, exchange: Option<&str>) -> Vec<ReconciliationResult> {
        let selected: Vec<String> = match exchange {
            Some(name) => vec![name.to_string()],
            None => self
                .aggregator
                .names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        let mut results = Vec::new();
        for name in &selected {
            let fetched = self.aggregator.fetch_one(name).await;
            if fetched.is_empty() {
                warn!(exchange = %name, "Nothing fetched, skipping verification");
                continue;
            }

            for kind in InstrumentKind::ALL {
                let api: Vec<Instrument> = fetched
                    .iter()
                    .filter(|i| i.kind() == kind)
                    .cloned()
                    .collect();
                if api.is_empty() {
                    continue;
                }

                match self.reconciler.compare(&api, name, kind).await {
                    Ok(result) => {
                        log_result(&result);
                        results.push(result);
                    }
                    Err(e) => {
                        warn!(exchange = %name, kind = %kind, error = %e, "Comparison failed");
                    }
                }
            }
        }
        results
    }
}

fn preview(symbols: &[String]) -> String {
    let shown = symbols
        .iter()
        .take(LOG_SYMBOL_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if symbols.len() > LOG_SYMBOL_LIMIT {
        format!("{shown}, ... (+{})", symbols.len() - LOG_SYMBOL_LIMIT)
    } else {
        shown
    }
}

fn log_result(result: &ReconciliationResult) {
    info!(
        exchange = %result.exchange,
        kind = %result.kind,
        api = result.api_count,
        db = result.db_count,
        new = result.new_in_api.len(),
        missing = result.missing_in_api.len(),
        common = result.common.len(),
        change_rate = %format!("{:.2}%", result.change_rate()),
        "Verification result"
    );
    if !result.new_in_api.is_empty() {
        info!(
            exchange = %result.exchange,
            kind = %result.kind,
            symbols = %preview(&result.new_in_api),
            "Listed but not stored"
        );
    }
    if !result.missing_in_api.is_empty() {
        info!(
            exchange = %result.exchange,
            kind = %result.kind,
            symbols = %preview(&result.missing_in_api),
            "Stored but not listed"
        );
    }
}
