//! Listwatch - new-listing detection for crypto exchanges.
//!
//! Polls the public instrument listings of Binance, OKX, Gate, Bitget and
//! Bybit (spot and derivatives), compares them against a SQLite store of
//! known instruments, persists the new ones and notifies about them.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Instruments, fingerprints, reconciliation results
//! - **`port`** - Traits for exchange adapters, the instrument store and notifiers
//! - **`adapter`** - HTTP exchange adapters, SQLite store, Telegram, CLI
//! - **`application`** - Aggregator, reconciler, sync and verify services
//! - **`infrastructure`** - Configuration and runtime wiring
//!
//! # Features
//!
//! - `telegram` - Telegram notifications (default)
//! - `testkit` - Test doubles for adapters, store and notifiers
//!
//! # Example
//!
//! ```no_run
//! use listwatch::application::{SyncOptions, SyncScope};
//! use listwatch::infrastructure::bootstrap;
//! use listwatch::infrastructure::config::settings::Config;
//!
//! # async fn run() -> listwatch::error::Result<()> {
//! let config = Config::load("listwatch.toml")?;
//! let service = bootstrap::build_sync_service(&config, SyncOptions::one_shot())?;
//! let report = service.run(&SyncScope::All).await?;
//! println!("{} new instruments", report.new_count());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
