#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rfootfall::core::store::{DayTotals, EventStore};
use rfootfall::db::store::SqliteStore;
use rfootfall::errors::{AppError, AppResult};
use rfootfall::models::event::Event;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's config and environment.
pub fn rff(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rfootfall");
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env_remove("FOOTFALL_DB_URL")
        .env_remove("FLUSH_INTERVAL_SECONDS")
        .env_remove("FLUSH_MAX_SIZE")
        .env_remove("REFRESH_SECONDS");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rfootfall.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Empty directory used as $HOME for one test
pub fn setup_test_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rfootfall_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Init a file DB through the CLI in test mode
pub fn init_db(home: &str, db_path: &str) {
    rff(home)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Footfall table as deployed before events carried a day.
pub fn create_legacy_store(db_path: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.execute_batch(
        r#"
        CREATE TABLE footfall (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now','localtime')),
            kind        TEXT NOT NULL CHECK(kind IN ('total','operational')),
            count       INTEGER NOT NULL DEFAULT 1
        );
        INSERT INTO footfall (created_at, kind, count) VALUES ('2025-08-30 09:15:00', 'total', 1);
        INSERT INTO footfall (created_at, kind, count) VALUES ('2025-08-30 10:00:00', 'operational', 1);
        INSERT INTO footfall (created_at, kind, count) VALUES ('2025-08-31 11:30:00', 'total', 2);
        "#,
    )
    .expect("create legacy table");
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn memory_store() -> SqliteStore {
    SqliteStore::open_ready(":memory:").expect("open in-memory store")
}

/// Wraps a real store and fails on demand, like an unreachable server.
pub struct FlakyStore {
    pub inner: SqliteStore,
    pub fail_writes: bool,
    pub fail_reads: bool,
    pub append_calls: usize,
}

impl FlakyStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            fail_writes: false,
            fail_reads: false,
            append_calls: 0,
        }
    }

    fn outage() -> AppError {
        AppError::Other("simulated store outage".to_string())
    }
}

impl EventStore for FlakyStore {
    fn ensure_schema(&mut self) -> AppResult<()> {
        self.inner.ensure_schema()
    }

    fn sum_for_day(&self, day: NaiveDate) -> AppResult<DayTotals> {
        if self.fail_reads {
            return Err(Self::outage());
        }
        self.inner.sum_for_day(day)
    }

    fn delete_most_recent(&mut self, day: NaiveDate) -> AppResult<bool> {
        if self.fail_writes {
            return Err(Self::outage());
        }
        self.inner.delete_most_recent(day)
    }

    fn append_batch(&mut self, events: &[Event]) -> AppResult<()> {
        self.append_calls += 1;
        if self.fail_writes {
            return Err(Self::outage());
        }
        self.inner.append_batch(events)
    }
}

/// Number of rows in the footfall table
pub fn row_count(store: &SqliteStore) -> i64 {
    store
        .pool()
        .conn
        .query_row("SELECT COUNT(*) FROM footfall", [], |row| row.get(0))
        .expect("count rows")
}
