//! SQLite connection wrapper (lightweight, one per session).

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the store lives, parsed from the configured connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAddress {
    File(String),
    Memory,
}

impl StoreAddress {
    /// Accepts `sqlite://<path>`, `sqlite::memory:`, `:memory:` or a plain path.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::MissingStoreAddress);
        }

        if raw == ":memory:" || raw == "sqlite::memory:" {
            return Ok(StoreAddress::Memory);
        }

        if let Some(path) = raw.strip_prefix("sqlite://") {
            if path.is_empty() {
                return Err(AppError::UnsupportedStoreAddress(raw.to_string()));
            }
            return Ok(StoreAddress::File(path.to_string()));
        }

        // Anything else with a scheme (postgres://, mysql://, ...) is not ours.
        if raw.contains("://") {
            return Err(AppError::UnsupportedStoreAddress(raw.to_string()));
        }

        Ok(StoreAddress::File(raw.to_string()))
    }

    pub fn describe(&self) -> String {
        match self {
            StoreAddress::File(p) => p.clone(),
            StoreAddress::Memory => ":memory:".to_string(),
        }
    }
}

pub struct DbPool {
    pub conn: Connection,
    pub address: StoreAddress,
}

impl DbPool {
    pub fn new(address: &str) -> AppResult<Self> {
        let address = StoreAddress::parse(address)?;
        let conn = match &address {
            StoreAddress::File(path) => Connection::open(Path::new(path))?,
            StoreAddress::Memory => Connection::open_in_memory()?,
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn, address })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        func(&mut self.conn)
    }
}
