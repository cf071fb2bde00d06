use domain::RepositoryError;
use event_log::{EventLogError, HandlerError};
use thiserror::Error;

use crate::{OnlineOrderRef, OnlineOrderState};

/// Errors that can occur during ordering operations.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Order is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OnlineOrderState,
        action: &'static str,
    },

    /// Order has no pizzas.
    #[error("Order has no pizzas")]
    NoPizzas,

    /// A payment reference is required but none was given or assigned.
    #[error("Payment reference is required")]
    PaymentRefRequired,

    /// The order already has a payment reference.
    #[error("Payment reference already assigned: {0}")]
    PaymentRefAlreadyAssigned(String),

    /// No order exists with the given reference.
    #[error("Online order not found: {0}")]
    NotFound(OnlineOrderRef),

    /// The Payments context rejected a request.
    #[error("Payment service error: {0}")]
    PaymentService(#[source] HandlerError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

/// Result type for ordering operations.
pub type Result<T> = std::result::Result<T, OrderingError>;
