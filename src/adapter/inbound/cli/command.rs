//! Command-line interface definitions.
//!
//! Defines the CLI structure for listwatch using `clap`: one-shot sync,
//! the polling daemon, store statistics, verification and the exchange
//! listing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Crypto exchange listing watcher
#[derive(Parser, Debug)]
#[command(name = "listwatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.listwatch/config.toml]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the listwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch listings once, store and report new instruments
    Sync(SyncArgs),

    /// Poll listings on an interval until interrupted
    Daemon(DaemonArgs),

    /// Show stored instrument counts
    Stats,

    /// Compare live listings against the store without writing
    Verify(VerifyArgs),

    /// List enabled exchanges and their endpoints
    Exchanges,
}

impl Commands {
    /// Whether the command only ends on a shutdown signal.
    ///
    /// Interrupting any other command leaves its work unfinished.
    #[must_use]
    pub const fn runs_until_interrupted(&self) -> bool {
        matches!(self, Self::Daemon(_))
    }
}

/// Arguments for `listwatch sync`.
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Only sync this exchange
    #[arg(short, long)]
    pub exchange: Option<String>,
}

/// Arguments for `listwatch daemon`.
#[derive(Args, Debug, Default)]
pub struct DaemonArgs {
    /// Only poll this exchange
    #[arg(short, long)]
    pub exchange: Option<String>,

    /// Seconds between runs (overrides config)
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,
}

/// Arguments for `listwatch verify`.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Only verify this exchange
    #[arg(short, long)]
    pub exchange: Option<String>,
}
