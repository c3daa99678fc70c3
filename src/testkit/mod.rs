//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`adapter`] - Scripted [`ExchangeAdapter`](crate::port::ExchangeAdapter)
//!   implementations: `StaticAdapter`, `FailingAdapter`, `PanickingAdapter`.
//! - [`store`] - `MemoryStore`, an in-memory instrument store with injectable
//!   failures.
//! - [`notifier`] - `RecordingNotifier` and `FailingNotifier`.
//! - [`domain`] - Builders for instruments.

pub mod adapter;
pub mod domain;
pub mod notifier;
pub mod store;
