//! Payment aggregate.

use common::Amount;
use domain::Aggregate;
use serde::{Deserialize, Serialize};

use crate::{PaymentEvent, PaymentState, PaymentsError};

common::define_ref! {
    /// Reference to a [`Payment`].
    pub PaymentRef
}

/// A payment of a fixed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    reference: PaymentRef,
    amount: Amount,
    state: PaymentState,
}

impl Payment {
    /// Creates a new payment. The amount must not be zero.
    pub fn new(reference: PaymentRef, amount: Amount) -> Result<Self, PaymentsError> {
        if amount.is_zero() {
            return Err(PaymentsError::ZeroAmount);
        }
        Ok(Self {
            reference,
            amount,
            state: PaymentState::New,
        })
    }

    pub fn reference(&self) -> &PaymentRef {
        &self.reference
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn state(&self) -> PaymentState {
        self.state
    }

    pub fn is_requested(&self) -> bool {
        self.state == PaymentState::Requested
    }

    pub fn is_successful(&self) -> bool {
        self.state == PaymentState::Successful
    }

    pub fn is_failed(&self) -> bool {
        self.state == PaymentState::Failed
    }

    /// Sends a new payment to the processor.
    pub fn request(&self) -> Result<PaymentEvent, PaymentsError> {
        self.guard(self.state.can_request(), "request")?;
        Ok(PaymentEvent::PaymentRequested {
            reference: self.reference.clone(),
        })
    }

    pub fn mark_successful(&self) -> Result<PaymentEvent, PaymentsError> {
        self.guard(self.state.can_settle(), "mark successful")?;
        Ok(PaymentEvent::PaymentSuccessful {
            reference: self.reference.clone(),
        })
    }

    pub fn mark_failed(&self) -> Result<PaymentEvent, PaymentsError> {
        self.guard(self.state.can_settle(), "mark failed")?;
        Ok(PaymentEvent::PaymentFailed {
            reference: self.reference.clone(),
        })
    }

    fn guard(&self, allowed: bool, action: &'static str) -> Result<(), PaymentsError> {
        if allowed {
            Ok(())
        } else {
            Err(PaymentsError::InvalidStateTransition {
                current_state: self.state,
                action,
            })
        }
    }
}

impl Aggregate for Payment {
    type Ref = PaymentRef;
    type Event = PaymentEvent;

    fn aggregate_type() -> &'static str {
        "Payment"
    }

    fn reference(&self) -> &PaymentRef {
        &self.reference
    }

    fn added(&self) -> PaymentEvent {
        PaymentEvent::PaymentAdded {
            payment: self.clone(),
        }
    }

    fn from_added(event: &PaymentEvent) -> Option<Self> {
        match event {
            PaymentEvent::PaymentAdded { payment } => Some(payment.clone()),
            _ => None,
        }
    }

    fn apply(&mut self, event: &PaymentEvent) {
        self.state = match event {
            PaymentEvent::PaymentAdded { .. } => return,
            PaymentEvent::PaymentRequested { .. } => PaymentState::Requested,
            PaymentEvent::PaymentSuccessful { .. } => PaymentState::Successful,
            PaymentEvent::PaymentFailed { .. } => PaymentState::Failed,
        };
    }
}
