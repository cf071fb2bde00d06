use domain::RepositoryError;
use event_log::{EventLogError, HandlerError};
use thiserror::Error;

/// Errors that can occur during delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Another context has no record of a reference it sent us.
    #[error("Unknown {kind}: {reference}")]
    UnknownForeignRef {
        kind: &'static str,
        reference: String,
    },

    #[error("Kitchen service error: {0}")]
    KitchenService(#[source] HandlerError),

    #[error("Ordering service error: {0}")]
    OrderingService(#[source] HandlerError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

/// Result type for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;
