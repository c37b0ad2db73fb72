//! SQLite-backed implementation of the event store.

use crate::core::store::{DayTotals, EventStore};
use crate::db::log::ttlog_quiet;
use crate::db::initialize::init_db;
use crate::db::migrate::{footfall_has_day_column, footfall_table_exists, log_table_exists};
use crate::db::pool::DbPool;
use crate::db::queries::{self, DaySource};
use crate::errors::AppResult;
use crate::models::event::{Event, StoredEvent};
use chrono::NaiveDate;

pub struct SqliteStore {
    pool: DbPool,
    day_source: DaySource,
    // False until the schema has a `log` table.
    audit: bool,
}

impl SqliteStore {
    /// Open the store at `address` without touching the schema.
    pub fn open(address: &str) -> AppResult<Self> {
        let pool = DbPool::new(address)?;
        let day_source = detect_day_source(&pool)?;
        let audit = log_table_exists(&pool.conn)?;
        Ok(Self {
            pool,
            day_source,
            audit,
        })
    }

    /// Open and make sure the schema is current. What every command uses.
    pub fn open_ready(address: &str) -> AppResult<Self> {
        let mut store = Self::open(address)?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn day_source(&self) -> DaySource {
        self.day_source
    }

    /// Whether flushes and undos are recorded in the `log` table.
    pub fn has_audit_log(&self) -> bool {
        self.audit
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    pub fn events_for_day(&self, day: NaiveDate) -> AppResult<Vec<StoredEvent>> {
        Ok(queries::load_events_by_day(&self.pool.conn, self.day_source, day)?)
    }

    fn record(&self, operation: &str, target: &str, message: &str) {
        if self.audit {
            ttlog_quiet(&self.pool.conn, operation, target, message);
        }
    }
}

fn detect_day_source(pool: &DbPool) -> AppResult<DaySource> {
    // A missing table will get the modern schema, so it counts as day-aware.
    if !footfall_table_exists(&pool.conn)? || footfall_has_day_column(&pool.conn)? {
        Ok(DaySource::DayColumn)
    } else {
        Ok(DaySource::CreatedAt)
    }
}

impl EventStore for SqliteStore {
    fn ensure_schema(&mut self) -> AppResult<()> {
        init_db(&self.pool.conn)?;
        self.day_source = detect_day_source(&self.pool)?;
        self.audit = log_table_exists(&self.pool.conn)?;
        Ok(())
    }

    fn sum_for_day(&self, day: NaiveDate) -> AppResult<DayTotals> {
        Ok(queries::sum_for_day(&self.pool.conn, self.day_source, day)?)
    }

    fn delete_most_recent(&mut self, day: NaiveDate) -> AppResult<bool> {
        let deleted = queries::delete_most_recent(&self.pool.conn, self.day_source, day)?;
        if deleted {
            self.record("undo", &queries::day_str(day), "Removed most recent persisted event");
        }
        Ok(deleted)
    }

    fn append_batch(&mut self, events: &[Event]) -> AppResult<()> {
        if events.is_empty() {
            return Ok(());
        }

        let source = self.day_source;
        self.pool
            .with_conn(|conn| queries::insert_batch(conn, source, events))?;

        self.record(
            "flush",
            "footfall",
            &format!("Committed {} buffered event(s)", events.len()),
        );
        Ok(())
    }
}
