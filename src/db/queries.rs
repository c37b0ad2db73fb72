use crate::core::store::DayTotals;
use crate::errors::AppError;
use crate::models::event::{Event, StoredEvent};
use crate::models::event_kind::EventKind;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, Result, Row, params};
use std::num::NonZeroU32;

/// Which column a day-aware query filters on.
///
/// Stores created before events were day-tagged have no `day` column; until
/// the migration runs, the day is derived from `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySource {
    DayColumn,
    CreatedAt,
}

impl DaySource {
    /// SQL expression yielding the day of a row.
    pub fn sql(&self) -> &'static str {
        match self {
            DaySource::DayColumn => "day",
            DaySource::CreatedAt => "date(created_at)",
        }
    }
}

pub fn day_str(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Naive local timestamp, so that `date(created_at)` is the local day.
fn now_str() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

pub fn sum_for_day(conn: &Connection, source: DaySource, day: NaiveDate) -> Result<DayTotals> {
    let sql = format!(
        "SELECT
           COALESCE(SUM(CASE WHEN kind = 'total' THEN count END), 0),
           COALESCE(SUM(CASE WHEN kind = 'operational' THEN count END), 0)
         FROM footfall
         WHERE {} = ?1",
        source.sql()
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let (total, operational): (i64, i64) =
        stmt.query_row([day_str(day)], |row| Ok((row.get(0)?, row.get(1)?)))?;

    // CHECK(count > 0) keeps both sums non-negative.
    Ok((total.max(0) as u64, operational.max(0) as u64))
}

/// Delete the greatest-id row for `day` in a single statement.
pub fn delete_most_recent(conn: &Connection, source: DaySource, day: NaiveDate) -> Result<bool> {
    let sql = format!(
        "DELETE FROM footfall
         WHERE id = (SELECT id FROM footfall WHERE {} = ?1 ORDER BY id DESC LIMIT 1)",
        source.sql()
    );

    let deleted = conn.execute(&sql, [day_str(day)])?;
    Ok(deleted == 1)
}

/// Insert all events inside one transaction.
pub fn insert_batch(conn: &mut Connection, source: DaySource, events: &[Event]) -> Result<()> {
    if events.is_empty() {
        return Ok(());
    }

    let created_at = now_str();
    let tx = conn.transaction()?;
    match source {
        DaySource::DayColumn => {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO footfall (created_at, day, kind, count) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for ev in events {
                stmt.execute(params![
                    created_at,
                    ev.day_str(),
                    ev.kind.to_db_str(),
                    ev.count.get()
                ])?;
            }
        }
        // Without a day column the event's day can only live in created_at,
        // so the row is stamped at noon of that day.
        DaySource::CreatedAt => {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO footfall (created_at, kind, count) VALUES (?1 || ' 12:00:00', ?2, ?3)",
            )?;
            for ev in events {
                stmt.execute(params![ev.day_str(), ev.kind.to_db_str(), ev.count.get()])?;
            }
        }
    }
    tx.commit()
}

pub fn load_events_by_day(conn: &Connection, source: DaySource, day: NaiveDate) -> Result<Vec<StoredEvent>> {
    let day_expr = source.sql();
    let sql = format!(
        "SELECT id, created_at, {day_expr} AS day, kind, count
         FROM footfall
         WHERE {day_expr} = ?1
         ORDER BY id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([day_str(day)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> Result<StoredEvent> {
    let day_raw: String = row.get("day")?;
    let day = NaiveDate::parse_from_str(&day_raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(2, AppError::InvalidDate(day_raw.clone())))?;

    let kind_raw: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_raw)
        .ok_or_else(|| conversion_error(3, AppError::InvalidEventKind(kind_raw.clone())))?;

    let count_raw: i64 = row.get("count")?;
    let count = u32::try_from(count_raw)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| conversion_error(4, AppError::InvalidCount(count_raw.to_string())))?;

    Ok(StoredEvent {
        id: row.get("id")?,
        created_at: row.get("created_at")?,
        event: Event::new(kind, day, count),
    })
}
