use domain::RepositoryError;
use event_log::{EventLogError, HandlerError};
use thiserror::Error;

use crate::{KitchenOrderRef, PizzaRef};

/// Errors that can occur during kitchen operations.
#[derive(Debug, Error)]
pub enum KitchenError {
    /// A kitchen order or pizza is not in the expected state.
    #[error("Invalid state transition: cannot {action} {aggregate_type} from {current_state} state")]
    InvalidStateTransition {
        aggregate_type: &'static str,
        current_state: &'static str,
        action: &'static str,
    },

    #[error("Kitchen order not found: {0}")]
    KitchenOrderNotFound(KitchenOrderRef),

    #[error("Pizza not found: {0}")]
    PizzaNotFound(PizzaRef),

    /// Another context has no record of a reference it sent us.
    #[error("Unknown {kind}: {reference}")]
    UnknownForeignRef {
        kind: &'static str,
        reference: String,
    },

    /// The Ordering context failed to answer a query.
    #[error("Ordering service error: {0}")]
    OrderingService(#[source] HandlerError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

/// Result type for kitchen operations.
pub type Result<T> = std::result::Result<T, KitchenError>;
