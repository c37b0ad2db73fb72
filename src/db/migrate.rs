use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

const DAY_COLUMN_MIGRATION: &str = "20251020_0001_add_day_to_footfall";

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `footfall` table exists.
pub fn footfall_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    table_exists(conn, "footfall")
}

/// Check if the `log` table exists.
pub fn log_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    table_exists(conn, "log")
}

/// Check if the `footfall` table has a `day` column.
pub fn footfall_has_day_column(conn: &Connection) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('footfall')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "day" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `footfall` table with the modern schema (including `day`).
fn create_footfall_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS footfall (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now','localtime')),
            day         TEXT NOT NULL DEFAULT (date('now','localtime')),
            kind        TEXT NOT NULL CHECK(kind IN ('total','operational')),
            count       INTEGER NOT NULL DEFAULT 1 CHECK(count > 0)
        );
        "#,
    )
}

fn ensure_indexes(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_footfall_day ON footfall(day);
        CREATE INDEX IF NOT EXISTS idx_footfall_day_kind ON footfall(day, kind);
        "#,
    )
}

/// Add `day` to a footfall table created before events were day-tagged.
///
/// SQLite refuses `ADD COLUMN` with a non-constant default, so the column is
/// added bare and existing rows get the day of their `created_at`. Every
/// insert path supplies `day` explicitly afterwards.
fn migrate_add_day_column(conn: &Connection) -> AppResult<()> {
    // IMMEDIATE: a second session running the same upgrade waits here, then
    // finds the column already present.
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    if footfall_has_day_column(&tx)? {
        return Ok(()); // already applied by someone else
    }

    warning("Adding 'day' column to footfall table...");

    tx.execute_batch(
        r#"
        ALTER TABLE footfall ADD COLUMN day TEXT;
        UPDATE footfall SET day = date(created_at) WHERE day IS NULL;
        "#,
    )
    .map_err(|e| AppError::Migration(format!("Failed to add 'day' column: {}", e)))?;

    ttlog(
        &tx,
        "migration_applied",
        DAY_COLUMN_MIGRATION,
        "Added day column to footfall, backfilled from created_at",
    )?;

    tx.commit()?;

    success(format!(
        "Migration applied: {} → added 'day' to footfall table",
        DAY_COLUMN_MIGRATION
    ));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by `SqliteStore::ensure_schema`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create footfall table if missing, otherwise upgrade it
    if !footfall_table_exists(conn)? {
        create_footfall_table(conn)?;
        success("Created footfall table.");
    } else if !footfall_has_day_column(conn)? {
        migrate_add_day_column(conn)?;
    }

    // 3) Indexes are rebuilt on every run (no-op when present)
    ensure_indexes(conn)?;

    Ok(())
}
