use crate::domain::{Instrument, InstrumentKind};
use crate::port::outbound::notifier::{
    Event, LogNotifier, NewInstrumentsEvent, Notifier, NotifierRegistry, NullNotifier,
    SummaryEvent,
};
use crate::testkit::notifier::{FailingNotifier, RecordingNotifier};

fn summary() -> Event {
    Event::SyncSummary(SummaryEvent { fetched: 10, new: 0 })
}

#[tokio::test]
async fn test_registry_notify_all() {
    let recorder = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();

    registry.register(Box::new(recorder.clone()));
    registry.register(Box::new(recorder.clone()));

    let delivered = registry.notify_all(&summary()).await;

    assert_eq!(delivered, 2);
    assert_eq!(recorder.summary_events(), 2);
}

#[tokio::test]
async fn test_registry_failure_does_not_stop_broadcast() {
    let recorder = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();

    registry.register(Box::new(FailingNotifier));
    registry.register(Box::new(recorder.clone()));

    let delivered = registry.notify_all(&summary()).await;

    assert_eq!(delivered, 1);
    assert_eq!(recorder.len(), 1);
}

#[tokio::test]
async fn test_null_notifier() {
    let notifier = NullNotifier;
    assert!(notifier.notify(&summary()).await.is_ok());
}

#[tokio::test]
async fn test_log_notifier_accepts_new_instruments() {
    let event = Event::NewInstruments(NewInstrumentsEvent {
        instruments: vec![Instrument::new("bybit", InstrumentKind::Spot, "BTCUSDT")],
    });
    assert!(LogNotifier.notify(&event).await.is_ok());
}

#[test]
fn test_registry_len_and_is_empty() {
    let mut registry = NotifierRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);

    registry.register(Box::new(NullNotifier));
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 1);
}
