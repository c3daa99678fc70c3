//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: exchange listings,
//! instrument storage, and notifications.

pub mod exchange;
pub mod notifier;
pub mod store;
