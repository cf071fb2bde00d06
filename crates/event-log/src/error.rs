use thiserror::Error;

use crate::{HandlerError, Topic};

/// Errors that can occur when publishing to or reading from the event log.
#[derive(Debug, Error)]
pub enum EventLogError {
    /// A subscribed handler failed. Handlers after it were not invoked.
    #[error("Handler failed for {event_type} on topic {topic}: {source}")]
    Handler {
        topic: Topic,
        event_type: String,
        #[source]
        source: HandlerError,
    },

    /// An envelope was built without one of its required fields.
    #[error("Incomplete event envelope: {0} is required")]
    IncompleteEnvelope(&'static str),

    /// A payload could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event log operations.
pub type Result<T> = std::result::Result<T, EventLogError>;
