//! Scripted [`ExchangeAdapter`] implementations for testing.
//!
//! - [`StaticAdapter`] - Returns fixed listings, optionally failing one kind.
//!   Counts calls so tests can assert which endpoints were hit.
//! - [`FailingAdapter`] - Every fetch fails with an API error.
//! - [`PanickingAdapter`] - Every fetch panics.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Instrument, InstrumentKind};
use crate::error::FetchError;
use crate::port::outbound::exchange::ExchangeAdapter;

/// An adapter that serves pre-built listings.
pub struct StaticAdapter {
    name: String,
    spot: Vec<Instrument>,
    derivatives: Vec<Instrument>,
    fail_spot: bool,
    fail_derivatives: bool,
    calls: Arc<AtomicU32>,
}

impl StaticAdapter {
    pub fn new(
        name: impl Into<String>,
        spot: Vec<Instrument>,
        derivatives: Vec<Instrument>,
    ) -> Self {
        Self {
            name: name.into(),
            spot,
            derivatives,
            fail_spot: false,
            fail_derivatives: false,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Make `fetch_spot` fail.
    pub fn failing_spot(mut self) -> Self {
        self.fail_spot = true;
        self
    }

    /// Make `fetch_derivatives` fail.
    pub fn failing_derivatives(mut self) -> Self {
        self.fail_derivatives = true;
        self
    }

    /// Shared counter of fetch calls.
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.calls)
    }

    fn serve(
        &self,
        kind: InstrumentKind,
        fail: bool,
        listing: &[Instrument],
    ) -> Result<Vec<Instrument>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            return Err(FetchError::api(&self.name, kind, "503", "scripted failure"));
        }
        Ok(listing.to_vec())
    }
}

#[async_trait]
impl ExchangeAdapter for StaticAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError> {
        self.serve(InstrumentKind::Spot, self.fail_spot, &self.spot)
    }

    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError> {
        self.serve(
            InstrumentKind::Derivative,
            self.fail_derivatives,
            &self.derivatives,
        )
    }
}

/// An adapter whose every fetch fails.
pub struct FailingAdapter {
    name: String,
}

impl FailingAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ExchangeAdapter for FailingAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError> {
        Err(FetchError::api(
            &self.name,
            InstrumentKind::Spot,
            "-1",
            "exchange unavailable",
        ))
    }

    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError> {
        Err(FetchError::api(
            &self.name,
            InstrumentKind::Derivative,
            "-1",
            "exchange unavailable",
        ))
    }
}

/// An adapter that panics inside its fetch task.
pub struct PanickingAdapter {
    name: String,
}

impl PanickingAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ExchangeAdapter for PanickingAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_spot(&self) -> Result<Vec<Instrument>, FetchError> {
        panic!("{} spot adapter panicked", self.name)
    }

    async fn fetch_derivatives(&self) -> Result<Vec<Instrument>, FetchError> {
        panic!("{} derivatives adapter panicked", self.name)
    }
}
