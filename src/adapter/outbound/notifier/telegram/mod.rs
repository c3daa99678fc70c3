//! Telegram notification delivery.
//!
//! Sends new-listing alerts and sync summaries to a chat via the Bot API.

mod format;

pub mod notifier;

pub use notifier::{TelegramConfig, TelegramNotifier};
