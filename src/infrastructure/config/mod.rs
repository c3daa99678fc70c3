//! Infrastructure configuration modules.

pub mod daemon;
pub mod exchanges;
pub mod logging;
pub mod settings;
pub mod telegram;
