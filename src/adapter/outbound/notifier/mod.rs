//! Notification adapters.
//!
//! Chat backends for the `port::Notifier` trait. The log and null notifiers
//! live next to the port itself.

#[cfg(feature = "telegram")]
pub mod telegram;

#[cfg(test)]
mod tests;
