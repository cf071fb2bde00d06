//! Repository error types.

use event_log::EventLogError;
use thiserror::Error;

/// Errors that can occur while persisting or rehydrating aggregates.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An aggregate with the same reference was already added.
    #[error("{aggregate_type} {reference} already exists")]
    AlreadyExists {
        aggregate_type: &'static str,
        reference: String,
    },

    /// The recorded history of an aggregate cannot be folded.
    #[error("Corrupt history for {aggregate_type} {reference}: {reason}")]
    CorruptHistory {
        aggregate_type: &'static str,
        reference: String,
        reason: String,
    },

    /// A stored row or event payload could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Publishing an event failed.
    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
