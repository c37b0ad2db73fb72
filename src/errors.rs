//! Unified application error type.
//! All modules (db, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Date {0} is in the future")]
    FutureDate(String),

    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),

    #[error("Invalid count: {0} (must be a positive integer)")]
    InvalidCount(String),

    // ---------------------------
    // Flush errors
    // ---------------------------
    #[error("Sync failed, {pending} event(s) kept in the buffer: {source}")]
    FlushFailed {
        pending: usize,
        #[source]
        source: Box<AppError>,
    },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No store address configured (run `rfootfall init`, set FOOTFALL_DB_URL or pass --db)")]
    MissingStoreAddress,

    #[error("Unsupported store address: {0}")]
    UnsupportedStoreAddress(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors that must stop the program before any store access.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::MissingStoreAddress
                | AppError::UnsupportedStoreAddress(_)
                | AppError::ConfigLoad(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
