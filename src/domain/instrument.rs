//! Tradable instrument and its fingerprint.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market category of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Spot trading pair.
    Spot,
    /// Perpetual swap or dated futures contract.
    Derivative,
}

impl InstrumentKind {
    /// All kinds, in fetch order.
    pub const ALL: [Self; 2] = [Self::Spot, Self::Derivative];

    /// Stable textual form used in fingerprints and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Derivative => "derivative",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "derivative" | "derivatives" | "futures" | "swap" | "perp" => Ok(Self::Derivative),
            other => Err(format!("unknown instrument kind '{other}'")),
        }
    }
}

/// Check that `name` can serve as the exchange part of a fingerprint.
///
/// Names are non-empty and made of lowercase ASCII letters, digits and `_`.
/// A `-` would let one exchange's fingerprints overlap another's.
///
/// # Errors
/// Returns the reason the name is rejected.
pub fn validate_exchange_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("must not be empty");
    }
    if name.contains('-') {
        return Err("must not contain '-'");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("must be lowercase ASCII letters, digits or '_'");
    }
    Ok(())
}

/// Reconciliation key: `exchange-kind-symbol`.
///
/// The inner String is private so every fingerprint is derived through
/// [`Fingerprint::of`]. Collision-free as long as the exchange passes
/// [`validate_exchange_name`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive the fingerprint for an exchange, kind and symbol.
    #[must_use]
    pub fn of(exchange: &str, kind: InstrumentKind, symbol: &str) -> Self {
        Self(format!("{exchange}-{}-{symbol}", kind.as_str()))
    }

    /// Get the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single tradable market on one exchange.
///
/// Immutable once built: the fingerprint is computed at construction and the
/// fields are only exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    exchange: String,
    kind: InstrumentKind,
    symbol: String,
    fingerprint: Fingerprint,
    observed_at: DateTime<Utc>,
}

impl Instrument {
    /// Create an instrument observed now.
    pub fn new(
        exchange: impl Into<String>,
        kind: InstrumentKind,
        symbol: impl Into<String>,
    ) -> Self {
        Self::with_observed_at(exchange, kind, symbol, Utc::now())
    }

    /// Create an instrument with an explicit first-observation time.
    pub fn with_observed_at(
        exchange: impl Into<String>,
        kind: InstrumentKind,
        symbol: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        let exchange = exchange.into();
        let symbol = symbol.into();
        let fingerprint = Fingerprint::of(&exchange, kind, &symbol);
        Self {
            exchange,
            kind,
            symbol,
            fingerprint,
            observed_at,
        }
    }

    #[must_use]
    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    #[must_use]
    pub const fn kind(&self) -> InstrumentKind {
        self.kind
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fingerprint.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_joins_fields_with_dashes() {
        let instrument = Instrument::new("binance", InstrumentKind::Spot, "BTCUSDT");
        assert_eq!(instrument.fingerprint().as_str(), "binance-spot-BTCUSDT");
    }

    #[test]
    fn equal_fields_give_equal_fingerprints() {
        let a = Instrument::new("okx", InstrumentKind::Derivative, "BTC-USDT-SWAP");
        let b = Instrument::new("okx", InstrumentKind::Derivative, "BTC-USDT-SWAP");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn any_differing_field_changes_fingerprint() {
        let base = Instrument::new("bybit", InstrumentKind::Spot, "ETHUSDT");
        let other_exchange = Instrument::new("bitget", InstrumentKind::Spot, "ETHUSDT");
        let other_kind = Instrument::new("bybit", InstrumentKind::Derivative, "ETHUSDT");
        let other_symbol = Instrument::new("bybit", InstrumentKind::Spot, "ETHUSDC");

        assert_ne!(base.fingerprint(), other_exchange.fingerprint());
        assert_ne!(base.fingerprint(), other_kind.fingerprint());
        assert_ne!(base.fingerprint(), other_symbol.fingerprint());
    }

    #[test]
    fn dashed_exchange_name_is_rejected() {
        // "a-spot"/"x" and "a"/"spot-x" would both render as a-spot-spot-x.
        let shadowing = Instrument::new("a-spot", InstrumentKind::Spot, "x");
        let shadowed = Instrument::new("a", InstrumentKind::Spot, "spot-x");
        assert_eq!(shadowing.fingerprint(), shadowed.fingerprint());

        assert_eq!(validate_exchange_name("a-spot"), Err("must not contain '-'"));
        assert!(validate_exchange_name("a").is_ok());
    }

    #[test]
    fn exchange_name_rules() {
        for name in ["binance", "okx", "gate_io", "exchange2"] {
            assert!(validate_exchange_name(name).is_ok(), "{name}");
        }
        for name in ["", "Binance", "gate io", "bybit!"] {
            assert!(validate_exchange_name(name).is_err(), "{name:?}");
        }
    }

    #[test]
    fn symbol_casing_is_preserved() {
        let instrument = Instrument::new("gate", InstrumentKind::Spot, "btc_usdt");
        assert_eq!(instrument.symbol(), "btc_usdt");
        assert_eq!(instrument.fingerprint().as_str(), "gate-spot-btc_usdt");
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("spot".parse::<InstrumentKind>(), Ok(InstrumentKind::Spot));
        assert_eq!(
            "futures".parse::<InstrumentKind>(),
            Ok(InstrumentKind::Derivative)
        );
        assert_eq!(
            " SWAP ".parse::<InstrumentKind>(),
            Ok(InstrumentKind::Derivative)
        );
        assert!("options".parse::<InstrumentKind>().is_err());
    }

    #[test]
    fn kind_display_matches_storage_form() {
        assert_eq!(InstrumentKind::Spot.to_string(), "spot");
        assert_eq!(InstrumentKind::Derivative.to_string(), "derivative");
    }
}
