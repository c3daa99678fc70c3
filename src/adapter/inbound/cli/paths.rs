//! Default filesystem locations.
//!
//! The configuration lives under `~/.listwatch/`:
//! - `~/.listwatch/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the listwatch home directory (`~/.listwatch/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".listwatch")
}

/// Returns the default config file path (`~/.listwatch/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
