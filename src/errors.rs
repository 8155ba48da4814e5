//! Unified error types for the course registry.
//!
//! Every fallible operation in the crate returns [`Result`]. Store-level failures
//! (`Validation`, `Duplicate`, `NotFound`) are recoverable and leave the affected
//! collection untouched; the remaining variants wrap backend and configuration failures.

use thiserror::Error;

/// Errors surfaced by the registry and its storage backends
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed one or more format, length, or required-field rules.
    #[error("Validation failed: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    /// Input duplicates an existing record under a uniqueness rule.
    #[error("{message}")]
    Duplicate { message: String },

    /// An update or delete referenced an id that is not in the collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the user-facing messages carried by a validation failure, if any.
    #[must_use]
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Validation { messages } => Some(messages),
            _ => None,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
