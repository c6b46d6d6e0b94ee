//! Error types for farmcal.

use thiserror::Error;

/// Errors that can occur while building calendar views.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for farmcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
