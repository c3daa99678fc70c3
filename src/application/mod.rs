//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod aggregator;
pub mod reconciler;
pub mod sync;
pub mod verify;

pub use aggregator::Aggregator;
pub use reconciler::{compare_symbols, partition_new, Reconciler};
pub use sync::{SyncOptions, SyncScope, SyncService};
pub use verify::VerifyService;
