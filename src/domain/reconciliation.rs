//! Point-in-time comparison between an exchange listing and stored state.

use serde::Serialize;

use super::instrument::InstrumentKind;

/// Result of comparing one exchange/kind listing against stored symbols.
///
/// Transient: produced for reporting and discarded afterwards. The three
/// symbol lists are pairwise disjoint and sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    pub exchange: String,
    pub kind: InstrumentKind,
    /// Number of instruments returned by the API (before symbol dedup).
    pub api_count: usize,
    /// Number of instruments held in the store for this exchange/kind.
    pub db_count: usize,
    /// Listed by the API but not yet stored.
    pub new_in_api: Vec<String>,
    /// Stored but absent from the latest listing (possibly delisted).
    pub missing_in_api: Vec<String>,
    /// Present on both sides.
    pub common: Vec<String>,
}

impl ReconciliationResult {
    /// Percentage of stored symbols that changed, relative to the stored count.
    ///
    /// Returns 0 when nothing is stored yet.
    #[must_use]
    pub fn change_rate(&self) -> f64 {
        if self.db_count == 0 {
            return 0.0;
        }
        (self.new_in_api.len() + self.missing_in_api.len()) as f64 / self.db_count as f64 * 100.0
    }

    /// True when the listing and the store agree.
    #[must_use]
    pub fn is_in_sync(&self) -> bool {
        self.new_in_api.is_empty() && self.missing_in_api.is_empty()
    }
}
