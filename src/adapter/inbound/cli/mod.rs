//! CLI module graph.

pub mod command;
pub mod context;
pub mod daemon;
pub mod exchanges;
pub mod output;
pub mod paths;
pub mod stats;
pub mod sync;
pub mod verify;
