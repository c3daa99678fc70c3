//! Run reports and store statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::instrument::{Instrument, InstrumentKind};

/// Per exchange/kind instrument counts, ordered for stable output.
pub type Breakdown = BTreeMap<(String, InstrumentKind), usize>;

/// Count instruments per exchange and kind.
#[must_use]
pub fn breakdown(instruments: &[Instrument]) -> Breakdown {
    let mut counts = Breakdown::new();
    for instrument in instruments {
        *counts
            .entry((instrument.exchange().to_string(), instrument.kind()))
            .or_default() += 1;
    }
    counts
}

/// Outcome of one sync run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Total instruments returned by the adapters.
    pub fetched: usize,
    /// Instruments whose fingerprint was not in the baseline.
    pub new_instruments: Vec<Instrument>,
    /// Rows the store actually inserted.
    pub inserted: usize,
    /// Fetched counts per exchange/kind.
    pub breakdown: Breakdown,
    pub elapsed: Duration,
}

impl SyncReport {
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.new_instruments.len()
    }

    #[must_use]
    pub fn has_new(&self) -> bool {
        !self.new_instruments.is_empty()
    }
}

/// Totals held by the instrument store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: u64,
    /// Count per exchange, in the order requested.
    pub by_exchange: Vec<(String, u64)>,
    pub spot: u64,
    pub derivative: u64,
}
