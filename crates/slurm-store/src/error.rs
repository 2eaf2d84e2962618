//! Store error types

use thiserror::Error;

/// Errors raised by an [`UpsertSink`](crate::UpsertSink).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record lacks the fields that identify it, so it cannot be merged.
    #[error("{kind} record has no natural key ({fields})")]
    MissingNaturalKey { kind: &'static str, fields: String },

    /// Writing to the destination failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the record failed
    #[error("cannot serialize record: {0}")]
    Json(#[from] serde_json::Error),
}
