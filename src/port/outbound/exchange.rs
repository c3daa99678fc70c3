//! Exchange port for instrument listings.
//!
//! One implementation per exchange. Each call issues a single read-only
//! request and normalizes the response into [`Instrument`]s.

use async_trait::async_trait;

use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;

/// Source of one exchange's instrument listings.
///
/// Implementations set `kind` explicitly per call and ignore any per-entry
/// status flag: every listed instrument is in scope. An empty listing is a
/// success. Nothing is retried.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Stable lowercase exchange identifier.
    fn name(&self) -> &str;

    /// Fetch the spot market listing.
    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError>;

    /// Fetch the derivatives (swap/futures) listing.
    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError>;

    /// Fetch the listing for `kind`.
    async fn fetch(&self, kind: InstrumentKind) -> Result<Vec<Instrument>, FetchError> {
        match kind {
            InstrumentKind::Spot => self.fetch_spot().await,
            InstrumentKind::Derivative => self.fetch_derivatives().await,
        }
    }
}
