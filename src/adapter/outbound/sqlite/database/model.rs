//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::instruments;

/// Database row for a stored instrument (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = instruments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstrumentRow {
    pub id: i32,
    pub exchange: String,
    pub kind: String,
    pub symbol: String,
    pub fingerprint: String,
    pub observed_at: String,
}

/// Database row for an instrument (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = instruments)]
pub struct NewInstrumentRow {
    pub exchange: String,
    pub kind: String,
    pub symbol: String,
    pub fingerprint: String,
    pub observed_at: String,
}
