//! Unified application error type.
//! All modules (db, core, http, cli) return AppError to keep the error
//! handling consistent. The HTTP layer maps each variant to a status code
//! in `http::error`.

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
    // Parsing / input errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid day of week: {0}")]
    InvalidDayOfWeek(String),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // ---------------------------
    // Session / ownership
    // ---------------------------
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("{0} belongs to another user")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("User already exists: {0}")]
    UserExists(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Server
    // ---------------------------
    #[error("Server error: {0}")]
    Server(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors caused by the caller's input rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidTime(_)
                | AppError::InvalidDayOfWeek(_)
                | AppError::MissingFields(_)
                | AppError::InvalidRequest(_)
                | AppError::Unauthenticated
                | AppError::Forbidden(_)
                | AppError::NotFound(_)
                | AppError::UnknownUser(_)
                | AppError::UserExists(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
