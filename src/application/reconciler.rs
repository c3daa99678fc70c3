//! Splitting fetched listings into new and known instruments.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Fingerprint, Instrument, InstrumentKind, ReconciliationResult};
use crate::error::{Error, Result};
use crate::port::outbound::store::InstrumentStore;

/// Keep the instruments whose fingerprint is not in `known`.
///
/// Order is preserved and duplicates inside `fetched` are left alone; the
/// store absorbs them on insert.
#[must_use]
pub fn partition_new(fetched: &[Instrument], known: &HashSet<Fingerprint>) -> Vec<Instrument> {
    fetched
        .iter()
        .filter(|i| !known.contains(i.fingerprint()))
        .cloned()
        .collect()
}

/// Compare an API listing with stored instruments by bare symbol.
#[must_use]
pub fn compare_symbols(
    exchange: &str,
    kind: InstrumentKind,
    api: &[Instrument],
    db: &[Instrument],
) -> ReconciliationResult {
    let api_symbols: BTreeSet<&str> = api.iter().map(Instrument::symbol).collect();
    let db_symbols: BTreeSet<&str> = db.iter().map(Instrument::symbol).collect();

    ReconciliationResult {
        exchange: exchange.to_string(),
        kind,
        api_count: api.len(),
        db_count: db.len(),
        new_in_api: api_symbols
            .difference(&db_symbols)
            .map(ToString::to_string)
            .collect(),
        missing_in_api: db_symbols
            .difference(&api_symbols)
            .map(ToString::to_string)
            .collect(),
        common: api_symbols
            .intersection(&db_symbols)
            .map(ToString::to_string)
            .collect(),
    }
}

/// Reconciles fetched listings against an [`InstrumentStore`].
pub struct Reconciler<S> {
    store: Arc<S>,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: InstrumentStore> Reconciler<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load every known fingerprint and return the unseen part of `fetched`.
    ///
    /// # Errors
    /// Returns [`Error::BaselineLoad`] when the store cannot be read.
    pub async fn find_new(&self, fetched: &[Instrument]) -> Result<Vec<Instrument>> {
        let known: HashSet<Fingerprint> = self
            .store
            .load_all()
            .await
            .map_err(|e| Error::BaselineLoad(e.to_string()))?
            .into_iter()
            .map(|i| i.fingerprint().clone())
            .collect();

        let new = partition_new(fetched, &known);
        for instrument in &new {
            debug!(fingerprint = %instrument.fingerprint(), "New instrument");
        }
        info!(
            fetched = fetched.len(),
            known = known.len(),
            existing = fetched.len() - new.len(),
            new = new.len(),
            "Reconciled listings"
        );
        Ok(new)
    }

    /// Compare `api` against what is stored for `exchange`/`kind`.
    ///
    /// # Errors
    /// Returns [`Error::BaselineLoad`] when the stored side cannot be read.
    pub async fn compare(
        &self,
        api: &[Instrument],
        exchange: &str,
        kind: InstrumentKind,
    ) -> Result<ReconciliationResult> {
        let db = self
            .store
            .load_by(exchange, kind)
            .await
            .map_err(|e| Error::BaselineLoad(e.to_string()))?;

        Ok(compare_symbols(exchange, kind, api, &db))
    }
}
