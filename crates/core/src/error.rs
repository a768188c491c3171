//! Error types for the askbridge service.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, search retrieval, completion,
//! and prompt assembly.

use thiserror::Error;

/// Unified error type for the askbridge service.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// Errors are represented and propagated, never panicked on; whether an
/// error reaches the HTTP caller or degrades to a default value is decided
/// at the request handler, not here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing secrets, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (socket bind, shutdown)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search backend errors (connectivity, auth, malformed response)
    #[error("Search error: {0}")]
    Search(String),

    /// Completion backend errors (connectivity, auth, malformed response)
    #[error("Completion error: {0}")]
    Completion(String),

    /// Prompt assembly errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
