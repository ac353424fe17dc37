//! Error types for giftboard-core

use thiserror::Error;

/// Result type alias using giftboard-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in giftboard-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Empty or malformed user input; the operation was not attempted
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Target record does not exist (usually deleted by another client)
    #[error("Person not found: {0}")]
    NotFound(String),

    /// Store unreachable or write rejected
    #[error("Store unavailable: {0}")]
    Transport(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a failure is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recovered locally and shown as a blocking prompt.
    Validation,
    /// Non-fatal banner; the action is abandoned.
    NotFound,
    /// Non-fatal banner; the user may retry manually.
    Transport,
}

impl Error {
    /// Classify this error for presentation.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Transport(_) | Self::Database(_) | Self::LibSql(_) | Self::Io(_) => {
                ErrorKind::Transport
            }
        }
    }
}
