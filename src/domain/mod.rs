//! Exchange-agnostic domain types.

pub mod instrument;
pub mod reconciliation;
pub mod stats;

pub use instrument::{validate_exchange_name, Fingerprint, Instrument, InstrumentKind};
pub use reconciliation::ReconciliationResult;
pub use stats::{breakdown, Breakdown, StoreStats, SyncReport};
