//! Domain-level error types.

use thiserror::Error;

/// Domain errors - input and ownership failures reported to callers.
///
/// The stores never return these; they are produced by the input helpers
/// the calling layer runs before invoking a store operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: u64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Unauthorized access")]
    Unauthorized,
}

/// Storage-level errors raised by persistence adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend failed: {0}")]
    Backend(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded while writing {key}")]
    QuotaExceeded { key: String },
}
