//! Payment events and payment processor events.

use domain::DomainEvent;
use serde::{Deserialize, Serialize};

use crate::{Payment, PaymentRef};

/// Events published on the `payments` topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentEvent {
    PaymentAdded { payment: Payment },
    PaymentRequested { reference: PaymentRef },
    PaymentSuccessful { reference: PaymentRef },
    PaymentFailed { reference: PaymentRef },
}

impl DomainEvent for PaymentEvent {
    type Ref = PaymentRef;

    fn event_type(&self) -> &'static str {
        match self {
            PaymentEvent::PaymentAdded { .. } => "PaymentAdded",
            PaymentEvent::PaymentRequested { .. } => "PaymentRequested",
            PaymentEvent::PaymentSuccessful { .. } => "PaymentSuccessful",
            PaymentEvent::PaymentFailed { .. } => "PaymentFailed",
        }
    }

    fn reference(&self) -> &PaymentRef {
        match self {
            PaymentEvent::PaymentAdded { payment } => payment.reference(),
            PaymentEvent::PaymentRequested { reference }
            | PaymentEvent::PaymentSuccessful { reference }
            | PaymentEvent::PaymentFailed { reference } => reference,
        }
    }
}

/// Outcome reported by the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Successful,
    Failed,
}

/// Events published by the payment processor on the `payment_processor` topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentProcessorEvent {
    PaymentProcessed {
        payment_ref: PaymentRef,
        status: PaymentStatus,
    },
}

impl PaymentProcessorEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            PaymentProcessorEvent::PaymentProcessed { .. } => "PaymentProcessed",
        }
    }

    pub fn payment_ref(&self) -> &PaymentRef {
        match self {
            PaymentProcessorEvent::PaymentProcessed { payment_ref, .. } => payment_ref,
        }
    }
}
