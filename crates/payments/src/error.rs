use domain::RepositoryError;
use event_log::{EventLogError, HandlerError};
use thiserror::Error;

use crate::{PaymentRef, PaymentState};

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentsError {
    /// Payment is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: PaymentState,
        action: &'static str,
    },

    #[error("Payment amount must be greater than zero")]
    ZeroAmount,

    #[error("Payment not found: {0}")]
    NotFound(PaymentRef),

    /// The payment processor refused the request.
    #[error("Payment processor error: {0}")]
    Processor(#[source] HandlerError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}

/// Result type for payment operations.
pub type Result<T> = std::result::Result<T, PaymentsError>;
