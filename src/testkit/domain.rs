//! Builders for domain values used across tests.

use crate::domain::{Instrument, InstrumentKind};

/// Create a spot [`Instrument`].
pub fn spot(exchange: &str, symbol: &str) -> Instrument {
    Instrument::new(exchange, InstrumentKind::Spot, symbol)
}

/// Create a derivative [`Instrument`].
pub fn derivative(exchange: &str, symbol: &str) -> Instrument {
    Instrument::new(exchange, InstrumentKind::Derivative, symbol)
}

/// Generate `n` spot instruments named `S0USDT`, `S1USDT`, ...
pub fn spot_batch(exchange: &str, n: usize) -> Vec<Instrument> {
    (0..n).map(|i| spot(exchange, &format!("S{i}USDT"))).collect()
}

/// Fingerprints of `instruments` as plain strings, in order.
pub fn fingerprints(instruments: &[Instrument]) -> Vec<String> {
    instruments
        .iter()
        .map(|i| i.fingerprint().to_string())
        .collect()
}
