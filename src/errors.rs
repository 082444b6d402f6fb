//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
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

    /// The session log cannot be read or repaired. Fatal at startup.
    #[error(
        "Session log integrity error: {reason}\n  database: {path}\n  \
         You should erase it, or inspect it with `pomolog db --check`."
    )]
    Integrity { path: String, reason: String },

    #[error("Invalid session status in store: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTime(String),

    #[error("Invalid number of minutes: {0}")]
    InvalidNumber(String),

    #[error("Please give either a duration (--duration) or an end time (--end)")]
    MissingTimer,

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("No running session to stop")]
    NoOpenSession,

    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Output
    // ---------------------------
    #[error("Transitions log error: {0}")]
    Transitions(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Wrap any error raised while checking the session log into a fatal
    /// integrity error pointing at the store location.
    pub fn integrity(path: &str, source: impl std::fmt::Display) -> Self {
        AppError::Integrity {
            path: path.to_string(),
            reason: source.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
