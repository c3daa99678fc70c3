//! Notifiers that record or reject events.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::outbound::notifier::{Event, Notifier};

/// Records every event it receives. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events received so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of `NewInstruments` events.
    pub fn new_instrument_events(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, Event::NewInstruments(_)))
            .count()
    }

    /// Count of `SyncSummary` events.
    pub fn summary_events(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| matches!(e, Event::SyncSummary(_)))
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn notify(&self, event: &Event) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn notify(&self, _event: &Event) -> Result<()> {
        Err(Error::Notify("scripted delivery failure".into()))
    }
}
