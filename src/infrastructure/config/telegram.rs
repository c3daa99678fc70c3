//! Telegram notification configuration.

use serde::Deserialize;

/// Telegram section of the config file.
///
/// Credentials never come from the file; they are read from
/// `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramAppConfig {
    /// `Some(false)` keeps telegram off even with credentials set. When left
    /// unset, telegram runs whenever credentials are present.
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl TelegramAppConfig {
    /// Explicitly switched off in the config file.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.enabled, Some(false))
    }

    /// Explicitly switched on in the config file.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self.enabled, Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flag_is_neither_disabled_nor_required() {
        let config = TelegramAppConfig::default();
        assert!(!config.is_disabled());
        assert!(!config.is_required());
    }

    #[test]
    fn explicit_flag_is_reported() {
        let off: TelegramAppConfig = toml::from_str("enabled = false").unwrap();
        let on: TelegramAppConfig = toml::from_str("enabled = true").unwrap();
        assert!(off.is_disabled());
        assert!(on.is_required());
    }
}
