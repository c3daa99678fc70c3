//! Telegram notification delivery.
//!
//! Provides the [`TelegramNotifier`] for sending new-listing alerts and sync
//! summaries to a single chat.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::port::outbound::notifier::{Event, Notifier};

use super::format::format_event_message;

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat ID for notifications.
    pub chat_id: i64,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`. Returns `None` if
    /// either variable is missing, empty or invalid.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_CHAT_ID").ok(),
        )
    }

    /// Build from raw token and chat id values.
    #[must_use]
    pub fn from_values(bot_token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        let bot_token = bot_token.filter(|t| !t.trim().is_empty())?;
        let chat_id = chat_id.and_then(|s| s.trim().parse().ok())?;
        Some(Self { bot_token, chat_id })
    }
}

/// Telegram notifier that sends messages to a chat.
///
/// Each event is delivered inline so the caller sees (and logs) delivery
/// failures for that event.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        info!(chat_id = config.chat_id, "Telegram notifier enabled");
        Self {
            bot: Bot::new(config.bot_token),
            chat_id: ChatId(config.chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, event: &Event) -> Result<()> {
        let Some(text) = format_event_message(event) else {
            return Ok(());
        };

        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(|e| Error::Notify(e.to_string()))?;

        debug!(chat_id = self.chat_id.0, "Telegram message sent");
        Ok(())
    }
}
