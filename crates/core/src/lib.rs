//! Shared primitives for all Rust crates in the payload tracker.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across payload tracker crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid client input, rejected before any query is built.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage or other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true when the error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}
