//! Persistence port for known instruments.

use std::future::Future;

use crate::domain::{Instrument, InstrumentKind, StoreStats};
use crate::error::Result;

/// Storage operations for observed instruments.
///
/// The fingerprint is the uniqueness constraint. Stored instruments are never
/// updated or deleted.
pub trait InstrumentStore: Send + Sync {
    /// Load every stored instrument.
    fn load_all(&self) -> impl Future<Output = Result<Vec<Instrument>>> + Send;

    /// Load stored instruments for one exchange and kind.
    fn load_by(
        &self,
        exchange: &str,
        kind: InstrumentKind,
    ) -> impl Future<Output = Result<Vec<Instrument>>> + Send;

    /// Insert instruments whose fingerprint is not stored yet.
    ///
    /// Duplicates (against the store or within `instruments`) are absorbed
    /// silently. Returns the number of rows actually inserted.
    fn insert_if_absent(
        &self,
        instruments: &[Instrument],
    ) -> impl Future<Output = Result<usize>> + Send;

    /// Count stored instruments overall, per requested exchange, and per kind.
    fn stats(&self, exchanges: &[String]) -> impl Future<Output = Result<StoreStats>> + Send;
}
