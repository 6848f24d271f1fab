//! # Error Types
//!
//! Core-level errors. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.

use thiserror::Error;

/// Errors from foundational type construction.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be parsed or is out of range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// An identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
