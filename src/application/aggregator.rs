//! Concurrent fan-out over every registered exchange adapter.
//!
//! ```text
//! fetch_all
//!    |
//!    +-- binance/spot ----+
//!    +-- binance/deriv ---+
//!    +-- okx/spot --------+--> JoinSet --> sort by slot --> Vec<Instrument>
//!    +-- ...              |
//!    +-- bybit/deriv -----+
//! ```
//!
//! Each task returns its own result tagged with a slot index. Nothing is
//! shared between tasks; the merge happens after the join on the calling task.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::domain::{validate_exchange_name, Instrument, InstrumentKind};
use crate::error::{Error, Result};
use crate::port::outbound::exchange::ExchangeAdapter;

/// Registry of exchange adapters with fan-out fetching.
#[derive(Clone, Default)]
pub struct Aggregator {
    adapters: Vec<Arc<dyn ExchangeAdapter>>,
}

impl Aggregator {
    /// Create an aggregator over `adapters`, kept in registration order.
    ///
    /// # Errors
    /// Returns [`Error::InvalidExchange`] if an adapter name is not a valid
    /// fingerprint component or is registered twice.
    pub fn new(adapters: Vec<Arc<dyn ExchangeAdapter>>) -> Result<Self> {
        let mut aggregator = Self::default();
        for adapter in adapters {
            aggregator.register(adapter)?;
        }
        Ok(aggregator)
    }

    /// Register another adapter at the end.
    ///
    /// # Errors
    /// Returns [`Error::InvalidExchange`] if the adapter name is not a valid
    /// fingerprint component or is already registered.
    pub fn register(&mut self, adapter: Arc<dyn ExchangeAdapter>) -> Result<()> {
        let name = adapter.name();
        validate_exchange_name(name).map_err(|reason| Error::InvalidExchange {
            name: name.to_string(),
            reason: reason.to_string(),
        })?;
        if self.contains(name) {
            return Err(Error::InvalidExchange {
                name: name.to_string(),
                reason: "already registered".to_string(),
            });
        }
        self.adapters.push(adapter);
        Ok(())
    }

    /// Registered exchange names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Whether an adapter named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Arc<dyn ExchangeAdapter>> {
        self.adapters.iter().find(|a| a.name() == name)
    }

    /// Fetch spot and derivative listings from every adapter concurrently.
    ///
    /// Failed fetches are logged and left out of the result. The merged
    /// output follows registration order, spot before derivatives.
    ///
    /// # Errors
    /// Returns [`Error::Internal`] only when a fetch task was cancelled by the
    /// runtime.
    pub async fn fetch_all(&self) -> Result<Vec<Instrument>> {
        let started = Instant::now();
        let mut tasks = JoinSet::new();

        for (index, adapter) in self.adapters.iter().enumerate() {
            for (offset, kind) in InstrumentKind::ALL.into_iter().enumerate() {
                let adapter = Arc::clone(adapter);
                let slot = index * InstrumentKind::ALL.len() + offset;
                tasks.spawn(async move { (slot, adapter.fetch(kind).await) });
            }
        }

        let mut succeeded = Vec::with_capacity(tasks.len());
        let mut failed = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, Ok(instruments))) => {
                    debug!(slot, count = instruments.len(), "Fetch task finished");
                    succeeded.push((slot, instruments));
                }
                Ok((_, Err(e))) => {
                    failed += 1;
                    warn!(
                        exchange = %e.exchange,
                        kind = %e.kind,
                        error = %e.source,
                        "Fetch failed, skipping"
                    );
                }
                Err(e) if e.is_panic() => {
                    failed += 1;
                    error!(error = %e, "Fetch task panicked, skipping");
                }
                Err(e) => {
                    return Err(Error::Internal(format!("fetch task cancelled: {e}")));
                }
            }
        }

        succeeded.sort_unstable_by_key(|(slot, _)| *slot);
        let merged: Vec<Instrument> = succeeded
            .into_iter()
            .flat_map(|(_, instruments)| instruments)
            .collect();

        info!(
            adapters = self.adapters.len(),
            fetched = merged.len(),
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched all listings"
        );
        Ok(merged)
    }

    /// Fetch both listings from a single exchange, one after the other.
    ///
    /// A failed listing is logged and skipped, keeping whatever the other
    /// listing returned. An unknown name yields an empty result.
    pub async fn fetch_one(&self, exchange: &str) -> Vec<Instrument> {
        let Some(adapter) = self.find(exchange) else {
            warn!(
                exchange,
                registered = ?self.names(),
                "Unknown exchange, nothing fetched"
            );
            return Vec::new();
        };

        let mut instruments = Vec::new();
        for kind in InstrumentKind::ALL {
            match adapter.fetch(kind).await {
                Ok(listed) => instruments.extend(listed),
                Err(e) => {
                    warn!(exchange, kind = %kind, error = %e.source, "Fetch failed, skipping");
                }
            }
        }

        info!(exchange, fetched = instruments.len(), "Fetched exchange listings");
        instruments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::adapter::{FailingAdapter, PanickingAdapter, StaticAdapter};

    fn spot(exchange: &str, symbol: &str) -> Instrument {
        Instrument::new(exchange, InstrumentKind::Spot, symbol)
    }

    fn derivative(exchange: &str, symbol: &str) -> Instrument {
        Instrument::new(exchange, InstrumentKind::Derivative, symbol)
    }

    fn fingerprints(instruments: &[Instrument]) -> Vec<String> {
        instruments
            .iter()
            .map(|i| i.fingerprint().to_string())
            .collect()
    }

    #[tokio::test]
    async fn fetch_all_merges_in_registration_order() {
        let aggregator = Aggregator::new(vec![
            Arc::new(StaticAdapter::new(
                "okx",
                vec![spot("okx", "BTC-USDT")],
                vec![derivative("okx", "BTC-USDT-SWAP")],
            )),
            Arc::new(StaticAdapter::new(
                "binance",
                vec![spot("binance", "BTCUSDT")],
                vec![],
            )),
        ])
        .unwrap();

        let merged = aggregator.fetch_all().await.unwrap();

        assert_eq!(
            fingerprints(&merged),
            vec![
                "okx-spot-BTC-USDT",
                "okx-derivative-BTC-USDT-SWAP",
                "binance-spot-BTCUSDT",
            ]
        );
    }

    #[tokio::test]
    async fn fetch_all_tolerates_a_failing_adapter() {
        let aggregator = Aggregator::new(vec![
            Arc::new(FailingAdapter::new("gate")),
            Arc::new(StaticAdapter::new(
                "bybit",
                vec![spot("bybit", "BTCUSDT")],
                vec![derivative("bybit", "BTCUSDT")],
            )),
        ])
        .unwrap();

        let merged = aggregator.fetch_all().await.unwrap();

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|i| i.exchange() == "bybit"));
    }

    #[tokio::test]
    async fn fetch_all_keeps_surviving_half_of_partial_failure() {
        let aggregator = Aggregator::new(vec![Arc::new(
            StaticAdapter::new("bitget", vec![spot("bitget", "BTCUSDT_SPBL")], vec![])
                .failing_derivatives(),
        )])
        .unwrap();

        let merged = aggregator.fetch_all().await.unwrap();

        assert_eq!(fingerprints(&merged), vec!["bitget-spot-BTCUSDT_SPBL"]);
    }

    #[tokio::test]
    async fn fetch_all_skips_panicking_adapter() {
        let aggregator = Aggregator::new(vec![
            Arc::new(PanickingAdapter::new("okx")),
            Arc::new(StaticAdapter::new(
                "binance",
                vec![spot("binance", "ETHUSDT")],
                vec![],
            )),
        ])
        .unwrap();

        let merged = aggregator.fetch_all().await.unwrap();

        assert_eq!(fingerprints(&merged), vec!["binance-spot-ETHUSDT"]);
    }

    #[tokio::test]
    async fn fetch_all_with_no_adapters_is_empty() {
        let aggregator = Aggregator::default();
        assert!(aggregator.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_one_unknown_exchange_is_empty() {
        let aggregator = Aggregator::new(vec![Arc::new(StaticAdapter::new(
            "binance",
            vec![spot("binance", "BTCUSDT")],
            vec![],
        ))]).unwrap();

        assert!(aggregator.fetch_one("unknown-exchange").await.is_empty());
    }

    #[tokio::test]
    async fn fetch_one_keeps_spot_when_derivatives_fail() {
        let aggregator = Aggregator::new(vec![Arc::new(
            StaticAdapter::new("gate", vec![spot("gate", "BTC_USDT")], vec![])
                .failing_derivatives(),
        )])
        .unwrap();

        let fetched = aggregator.fetch_one("gate").await;

        assert_eq!(fingerprints(&fetched), vec!["gate-spot-BTC_USDT"]);
    }

    #[tokio::test]
    async fn fetch_one_asks_each_kind_once() {
        let adapter = StaticAdapter::new("okx", vec![], vec![derivative("okx", "ETH-USDT-SWAP")])
            .failing_spot();
        let calls = adapter.calls();
        let aggregator = Aggregator::new(vec![Arc::new(adapter)]).unwrap();

        let fetched = aggregator.fetch_one("okx").await;

        assert_eq!(fingerprints(&fetched), vec!["okx-derivative-ETH-USDT-SWAP"]);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn dashed_adapter_name_is_rejected() {
        let result = Aggregator::new(vec![Arc::new(StaticAdapter::new("a-spot", vec![], vec![]))]);

        assert!(matches!(
            result,
            Err(Error::InvalidExchange { ref name, .. }) if name == "a-spot"
        ));
    }

    #[test]
    fn duplicate_adapter_name_is_rejected() {
        let mut aggregator =
            Aggregator::new(vec![Arc::new(StaticAdapter::new("gate", vec![], vec![]))]).unwrap();

        let err = aggregator
            .register(Arc::new(StaticAdapter::new("gate", vec![], vec![])))
            .unwrap_err();

        assert!(err.to_string().contains("already registered"));
        assert_eq!(aggregator.len(), 1);
    }

    #[test]
    fn registry_inspection() {
        let mut aggregator = Aggregator::default();
        assert!(aggregator.is_empty());

        aggregator
            .register(Arc::new(StaticAdapter::new("okx", vec![], vec![])))
            .unwrap();
        aggregator
            .register(Arc::new(StaticAdapter::new("gate", vec![], vec![])))
            .unwrap();

        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.names(), vec!["okx", "gate"]);
        assert!(aggregator.contains("gate"));
        assert!(!aggregator.contains("kraken"));
    }
}
