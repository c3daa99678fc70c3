//! Daemon loop configuration.

use std::time::Duration;

use serde::Deserialize;

/// Settings for `listwatch daemon`.
#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    /// Seconds between sync runs (default: 5).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    5
}

impl DaemonConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}
