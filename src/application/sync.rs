//! One sync run: fetch, reconcile, persist, notify.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::domain::{breakdown, Instrument, SyncReport};
use crate::error::{Error, Result};
use crate::port::outbound::notifier::{Event, NewInstrumentsEvent, NotifierRegistry, SummaryEvent};
use crate::port::outbound::store::InstrumentStore;

use super::aggregator::Aggregator;
use super::reconciler::Reconciler;

/// Which exchanges a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncScope {
    /// Every registered exchange, fetched concurrently.
    #[default]
    All,
    /// A single exchange by name.
    Exchange(String),
}

impl fmt::Display for SyncScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Exchange(name) => f.write_str(name),
        }
    }
}

/// Tunables for [`SyncService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Send the summary event even when nothing new was found.
    pub summarize_when_unchanged: bool,
}

impl SyncOptions {
    /// One-shot runs always report.
    #[must_use]
    pub const fn one_shot() -> Self {
        Self {
            summarize_when_unchanged: true,
        }
    }

    /// Daemon runs only report when something changed.
    #[must_use]
    pub const fn daemon() -> Self {
        Self {
            summarize_when_unchanged: false,
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::one_shot()
    }
}

/// Drives the fetch → reconcile → persist → notify pipeline.
pub struct SyncService<S> {
    aggregator: Aggregator,
    store: Arc<S>,
    reconciler: Reconciler<S>,
    notifiers: NotifierRegistry,
    options: SyncOptions,
}

impl<S: InstrumentStore> SyncService<S> {
    pub fn new(
        aggregator: Aggregator,
        store: Arc<S>,
        notifiers: NotifierRegistry,
        options: SyncOptions,
    ) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&store));
        Self {
            aggregator,
            store,
            reconciler,
            notifiers,
            options,
        }
    }

    #[must_use]
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Execute one run.
    ///
    /// Adapter failures only shrink the fetched set. Notification failures
    /// are logged by the registry.
    ///
    /// # Errors
    /// Returns [`Error::BaselineLoad`] when stored fingerprints cannot be
    /// read, [`Error::StorageWrite`] when new instruments cannot be written,
    /// and [`Error::Internal`] when the fetch fan-out itself breaks.
    pub async fn run(&self, scope: &SyncScope) -> Result<SyncReport> {
        let started = Instant::now();
        info!(scope = %scope, "Sync run started");

        let fetched = self.fetch(scope).await?;
        let counts = breakdown(&fetched);
        for ((exchange, kind), count) in &counts {
            info!(exchange = %exchange, kind = %kind, count, "Fetched");
        }

        let new_instruments = self.reconciler.find_new(&fetched).await?;

        let inserted = if new_instruments.is_empty() {
            0
        } else {
            self.store
                .insert_if_absent(&new_instruments)
                .await
                .map_err(|e| Error::StorageWrite(e.to_string()))?
        };

        self.notify(fetched.len(), &new_instruments).await;

        let report = SyncReport {
            fetched: fetched.len(),
            new_instruments,
            inserted,
            breakdown: counts,
            elapsed: started.elapsed(),
        };

        info!(
            scope = %scope,
            fetched = report.fetched,
            new = report.new_count(),
            inserted = report.inserted,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Sync run finished"
        );
        if report.inserted != report.new_count() {
            warn!(
                new = report.new_count(),
                inserted = report.inserted,
                "Store absorbed duplicate instruments"
            );
        }

        Ok(report)
    }

    async fn fetch(&self, scope: &SyncScope) -> Result<Vec<Instrument>> {
        match scope {
            SyncScope::All => self.aggregator.fetch_all().await,
            SyncScope::Exchange(name) => Ok(self.aggregator.fetch_one(name).await),
        }
    }

    async fn notify(&self, fetched: usize, new_instruments: &[Instrument]) {
        if !new_instruments.is_empty() {
            let event = Event::NewInstruments(NewInstrumentsEvent {
                instruments: new_instruments.to_vec(),
            });
            self.notifiers.notify_all(&event).await;
        }

        if self.options.summarize_when_unchanged || !new_instruments.is_empty() {
            let event = Event::SyncSummary(SummaryEvent {
                fetched,
                new: new_instruments.len(),
            });
            self.notifiers.notify_all(&event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::adapter::{FailingAdapter, StaticAdapter};
    use crate::testkit::domain::{derivative, fingerprints, spot};
    use crate::testkit::notifier::{FailingNotifier, RecordingNotifier};
    use crate::testkit::store::MemoryStore;

    fn aggregator() -> Aggregator {
        Aggregator::new(vec![
            Arc::new(StaticAdapter::new(
                "binance",
                vec![spot("binance", "BTCUSDT"), spot("binance", "ETHUSDT")],
                vec![derivative("binance", "BTCUSDT")],
            )),
            Arc::new(StaticAdapter::new(
                "okx",
                vec![spot("okx", "BTC-USDT")],
                vec![],
            )),
        ])
        .unwrap()
    }

    fn service(
        store: Arc<MemoryStore>,
        recorder: &RecordingNotifier,
        options: SyncOptions,
    ) -> SyncService<MemoryStore> {
        let mut notifiers = NotifierRegistry::new();
        notifiers.register(Box::new(recorder.clone()));
        SyncService::new(aggregator(), store, notifiers, options)
    }

    #[tokio::test]
    async fn first_run_inserts_everything() {
        let store = Arc::new(MemoryStore::new());
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::one_shot());

        let report = service.run(&SyncScope::All).await.unwrap();

        assert_eq!(report.fetched, 4);
        assert_eq!(report.new_count(), 4);
        assert_eq!(report.inserted, 4);
        assert_eq!(store.len(), 4);
        assert_eq!(recorder.new_instrument_events(), 1);
        assert_eq!(recorder.summary_events(), 1);
    }

    #[tokio::test]
    async fn second_identical_run_inserts_nothing() {
        let store = Arc::new(MemoryStore::new());
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::one_shot());

        service.run(&SyncScope::All).await.unwrap();
        let report = service.run(&SyncScope::All).await.unwrap();

        assert_eq!(report.new_count(), 0);
        assert_eq!(report.inserted, 0);
        assert_eq!(store.len(), 4);
        assert_eq!(recorder.new_instrument_events(), 1);
        assert_eq!(recorder.summary_events(), 2);
    }

    #[tokio::test]
    async fn daemon_run_stays_quiet_without_changes() {
        let store = Arc::new(MemoryStore::with_instruments(vec![
            spot("binance", "BTCUSDT"),
            spot("binance", "ETHUSDT"),
            derivative("binance", "BTCUSDT"),
            spot("okx", "BTC-USDT"),
        ]));
        let recorder = RecordingNotifier::new();
        let service = service(store, &recorder, SyncOptions::daemon());

        let report = service.run(&SyncScope::All).await.unwrap();

        assert!(!report.has_new());
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn only_unseen_instruments_are_new() {
        let store = Arc::new(MemoryStore::with_instruments(vec![spot("binance", "BTCUSDT")]));
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::daemon());

        let report = service.run(&SyncScope::All).await.unwrap();

        assert_eq!(
            fingerprints(&report.new_instruments),
            vec![
                "binance-spot-ETHUSDT",
                "binance-derivative-BTCUSDT",
                "okx-spot-BTC-USDT",
            ]
        );
        assert_eq!(recorder.summary_events(), 1);
    }

    #[tokio::test]
    async fn single_exchange_scope_fetches_one_adapter() {
        let store = Arc::new(MemoryStore::new());
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::one_shot());

        let report = service
            .run(&SyncScope::Exchange("okx".into()))
            .await
            .unwrap();

        assert_eq!(fingerprints(&report.new_instruments), vec!["okx-spot-BTC-USDT"]);
    }

    #[tokio::test]
    async fn baseline_failure_aborts_before_writing() {
        let store = Arc::new(MemoryStore::new());
        store.fail_loads(true);
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::one_shot());

        let err = service.run(&SyncScope::All).await.unwrap_err();

        assert!(matches!(err, Error::BaselineLoad(_)));
        assert!(store.is_empty());
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn write_failure_aborts_as_storage_error() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes(true);
        let recorder = RecordingNotifier::new();
        let service = service(Arc::clone(&store), &recorder, SyncOptions::one_shot());

        let err = service.run(&SyncScope::All).await.unwrap_err();

        assert!(matches!(err, Error::StorageWrite(_)));
        assert!(recorder.is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_run() {
        let store = Arc::new(MemoryStore::new());
        let mut notifiers = NotifierRegistry::new();
        notifiers.register(Box::new(FailingNotifier));
        let service = SyncService::new(
            aggregator(),
            Arc::clone(&store),
            notifiers,
            SyncOptions::one_shot(),
        );

        let report = service.run(&SyncScope::All).await.unwrap();

        assert_eq!(report.inserted, 4);
    }

    #[tokio::test]
    async fn failing_adapter_only_shrinks_the_batch() {
        let store = Arc::new(MemoryStore::new());
        let aggregator = Aggregator::new(vec![
            Arc::new(FailingAdapter::new("gate")),
            Arc::new(StaticAdapter::new(
                "bybit",
                vec![spot("bybit", "BTCUSDT")],
                vec![],
            )),
        ])
        .unwrap();
        let service = SyncService::new(
            aggregator,
            Arc::clone(&store),
            NotifierRegistry::new(),
            SyncOptions::one_shot(),
        );

        let report = service.run(&SyncScope::All).await.unwrap();

        assert_eq!(report.fetched, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn scope_display() {
        assert_eq!(SyncScope::All.to_string(), "all");
        assert_eq!(SyncScope::Exchange("gate".into()).to_string(), "gate");
    }
}
