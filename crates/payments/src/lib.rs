//! Payments bounded context.
//!
//! A `Payment` is created for an amount, requested through a
//! [`PaymentProcessor`] and settled when the processor reports back with
//! `PaymentProcessed` on [`PAYMENT_PROCESSOR_TOPIC`]. Payment events are
//! published on [`PAYMENTS_TOPIC`].

mod aggregate;
mod error;
mod events;
mod processor;
mod service;
mod state;

use event_log::Topic;

pub use aggregate::{Payment, PaymentRef};
pub use error::{PaymentsError, Result};
pub use events::{PaymentEvent, PaymentProcessorEvent, PaymentStatus};
pub use processor::{AutoPaymentProcessor, PaymentProcessor, RecordingPaymentProcessor};
pub use service::PaymentService;
pub use state::PaymentState;

/// Topic carrying [`PaymentEvent`]s.
pub const PAYMENTS_TOPIC: Topic = Topic::from_static("payments");

/// Topic on which the payment processor reports outcomes.
pub const PAYMENT_PROCESSOR_TOPIC: Topic = Topic::from_static("payment_processor");
