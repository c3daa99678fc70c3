//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed instrument store using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteInstrumentStore;
