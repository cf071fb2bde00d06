//! Shadow of the Payments context.

use async_trait::async_trait;
use common::Amount;
use event_log::{HandlerError, Topic};
use serde::{Deserialize, Serialize};

/// Topic on which Payments publishes payment events.
pub const PAYMENTS_TOPIC: Topic = Topic::from_static("payments");

common::define_ref! {
    /// Reference to a payment owned by the Payments context.
    pub PaymentRef
}

/// The payment events Ordering reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentEvent {
    PaymentSuccessful {
        reference: PaymentRef,
    },

    /// Any payment event Ordering ignores.
    #[serde(other)]
    Other,
}

/// What Ordering needs from the Payments context.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Creates a payment for `amount` and returns its reference.
    async fn create_payment_of(&self, amount: Amount) -> Result<PaymentRef, HandlerError>;

    /// Asks the payment processor to collect the payment.
    async fn request_payment_for(&self, payment_ref: &PaymentRef) -> Result<(), HandlerError>;
}
