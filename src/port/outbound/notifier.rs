//! Notifier port for sync results.
//!
//! Delivery is best-effort: a failing notifier is logged by the registry and
//! never fails the run that produced the event.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::Instrument;
use crate::error::Result;

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// Instruments seen for the first time in this run.
    NewInstruments(NewInstrumentsEvent),
    /// End-of-run summary.
    SyncSummary(SummaryEvent),
}

/// Newly listed instruments.
#[derive(Debug, Clone)]
pub struct NewInstrumentsEvent {
    pub instruments: Vec<Instrument>,
}

/// Summary of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryEvent {
    /// Total instruments checked.
    pub fetched: usize,
    /// Instruments not seen before.
    pub new: usize,
}

/// Trait for notification handlers.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Deliver an event. Returns an error when delivery failed.
    async fn notify(&self, event: &Event) -> Result<()>;
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    ///
    /// Failures are logged and swallowed. Returns how many deliveries
    /// succeeded.
    pub async fn notify_all(&self, event: &Event) -> usize {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            match notifier.notify(event).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(notifier = notifier.name(), error = %e, "Notification failed");
                }
            }
        }
        delivered
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn notify(&self, _event: &Event) -> Result<()> {
        Ok(())
    }
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, event: &Event) -> Result<()> {
        match event {
            Event::NewInstruments(e) => {
                for instrument in &e.instruments {
                    info!(
                        exchange = instrument.exchange(),
                        kind = %instrument.kind(),
                        symbol = instrument.symbol(),
                        "New instrument"
                    );
                }
            }
            Event::SyncSummary(e) => {
                info!(fetched = e.fetched, new = e.new, "Sync summary");
            }
        }
        Ok(())
    }
}
