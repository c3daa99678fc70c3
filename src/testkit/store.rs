//! In-memory [`InstrumentStore`] for tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::domain::{Fingerprint, Instrument, InstrumentKind, StoreStats};
use crate::error::{Error, Result};
use crate::port::outbound::store::InstrumentStore;

#[derive(Default)]
struct Inner {
    rows: Vec<Instrument>,
    fingerprints: HashSet<Fingerprint>,
}

/// Thread-safe in-memory instrument store with the same insert semantics as
/// the SQLite store: first write per fingerprint wins.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    fail_loads: AtomicBool,
    fail_loads_for: RwLock<HashSet<(String, InstrumentKind)>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `instruments`.
    pub fn with_instruments(instruments: Vec<Instrument>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for instrument in instruments {
                if inner.fingerprints.insert(instrument.fingerprint().clone()) {
                    inner.rows.push(instrument);
                }
            }
        }
        store
    }

    /// Make every load fail until reset.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Make `load_by` fail for one exchange and kind only.
    pub fn fail_loads_for(&self, exchange: impl Into<String>, kind: InstrumentKind) {
        self.fail_loads_for.write().insert((exchange.into(), kind));
    }

    /// Make every insert fail until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored instruments.
    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of stored instruments in insertion order.
    pub fn snapshot(&self) -> Vec<Instrument> {
        self.inner.read().rows.clone()
    }

    fn check_loads(&self) -> Result<()> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Error::Database("scripted load failure".into()));
        }
        Ok(())
    }
}

impl InstrumentStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Instrument>> {
        self.check_loads()?;
        Ok(self.snapshot())
    }

    async fn load_by(&self, exchange: &str, kind: InstrumentKind) -> Result<Vec<Instrument>> {
        self.check_loads()?;
        if self.fail_loads_for.read().contains(&(exchange.to_string(), kind)) {
            return Err(Error::Database(format!(
                "scripted load failure for {exchange}/{kind}"
            )));
        }
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|i| i.exchange() == exchange && i.kind() == kind)
            .cloned()
            .collect())
    }

    async fn insert_if_absent(&self, instruments: &[Instrument]) -> Result<usize> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Database("scripted write failure".into()));
        }

        let mut inner = self.inner.write();
        let mut inserted = 0;
        for instrument in instruments {
            if inner.fingerprints.insert(instrument.fingerprint().clone()) {
                inner.rows.push(instrument.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn stats(&self, exchanges: &[String]) -> Result<StoreStats> {
        self.check_loads()?;
        let inner = self.inner.read();
        let kind_count = |kind: InstrumentKind| {
            inner.rows.iter().filter(|i| i.kind() == kind).count() as u64
        };

        Ok(StoreStats {
            total: inner.rows.len() as u64,
            by_exchange: exchanges
                .iter()
                .map(|name| {
                    let count = inner
                        .rows
                        .iter()
                        .filter(|i| i.exchange() == name.as_str())
                        .count();
                    (name.clone(), count as u64)
                })
                .collect(),
            spot: kind_count(InstrumentKind::Spot),
            derivative: kind_count(InstrumentKind::Derivative),
        })
    }
}
