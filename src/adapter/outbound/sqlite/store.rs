//! SQLite instrument store implementation.
//!
//! Persists every observed instrument keyed by its fingerprint using SQLite and
//! Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{InstrumentRow, NewInstrumentRow};
use crate::adapter::outbound::sqlite::database::schema::instruments;
use crate::domain::{Instrument, InstrumentKind, StoreStats};
use crate::error::{Error, Result};
use crate::port::outbound::store::InstrumentStore;

/// Rows per INSERT statement.
const INSERT_CHUNK: usize = 500;

/// SQLite-backed instrument store.
///
/// Implements the [`InstrumentStore`] trait on top of a pooled connection.
/// Inserts rely on the UNIQUE fingerprint column and `INSERT OR IGNORE`, so
/// re-inserting a known instrument is a no-op.
pub struct SqliteInstrumentStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteInstrumentStore {
    /// Create a new SQLite instrument store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    fn to_row(instrument: &Instrument) -> NewInstrumentRow {
        NewInstrumentRow {
            exchange: instrument.exchange().to_string(),
            kind: instrument.kind().as_str().to_string(),
            symbol: instrument.symbol().to_string(),
            fingerprint: instrument.fingerprint().as_str().to_string(),
            observed_at: instrument.observed_at().to_rfc3339(),
        }
    }

    fn from_row(row: InstrumentRow) -> Result<Instrument> {
        let kind: InstrumentKind = row.kind.parse().map_err(Error::Parse)?;
        let observed_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.observed_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        Ok(Instrument::with_observed_at(
            row.exchange,
            kind,
            row.symbol,
            observed_at,
        ))
    }

    fn count_where_exchange(conn: &mut SqliteConnection, exchange: &str) -> Result<u64> {
        let count: i64 = instruments::table
            .filter(instruments::exchange.eq(exchange))
            .count()
            .get_result(conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count.unsigned_abs())
    }

    fn count_where_kind(conn: &mut SqliteConnection, kind: InstrumentKind) -> Result<u64> {
        let count: i64 = instruments::table
            .filter(instruments::kind.eq(kind.as_str()))
            .count()
            .get_result(conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count.unsigned_abs())
    }
}

impl InstrumentStore for SqliteInstrumentStore {
    async fn load_all(&self) -> Result<Vec<Instrument>> {
        let mut conn = self.conn()?;

        let rows: Vec<InstrumentRow> = instruments::table
            .select(InstrumentRow::as_select())
            .order(instruments::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn load_by(&self, exchange: &str, kind: InstrumentKind) -> Result<Vec<Instrument>> {
        let mut conn = self.conn()?;

        let rows: Vec<InstrumentRow> = instruments::table
            .filter(instruments::exchange.eq(exchange))
            .filter(instruments::kind.eq(kind.as_str()))
            .select(InstrumentRow::as_select())
            .order(instruments::symbol.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn insert_if_absent(&self, batch: &[Instrument]) -> Result<usize> {
        if batch.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewInstrumentRow> = batch.iter().map(Self::to_row).collect();
        let mut conn = self.conn()?;

        let inserted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let mut inserted = 0;
                for chunk in rows.chunks(INSERT_CHUNK) {
                    inserted += diesel::insert_or_ignore_into(instruments::table)
                        .values(chunk)
                        .execute(conn)?;
                }
                Ok(inserted)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(requested = batch.len(), inserted, "Inserted instruments");
        Ok(inserted)
    }

    async fn stats(&self, exchanges: &[String]) -> Result<StoreStats> {
        let mut conn = self.conn()?;

        let total: i64 = instruments::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let by_exchange = exchanges
            .iter()
            .map(|name| Ok((name.clone(), Self::count_where_exchange(&mut conn, name)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(StoreStats {
            total: total.unsigned_abs(),
            by_exchange,
            spot: Self::count_where_kind(&mut conn, InstrumentKind::Spot)?,
            derivative: Self::count_where_kind(&mut conn, InstrumentKind::Derivative)?,
        })
    }
}
