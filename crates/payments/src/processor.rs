//! Payment processor port and its in-process adapters.

use std::sync::Arc;

use async_trait::async_trait;
use event_log::{EventEnvelope, EventLog, HandlerError};
use tokio::sync::RwLock;

use crate::{PAYMENT_PROCESSOR_TOPIC, Payment, PaymentProcessorEvent, PaymentRef, PaymentStatus};

/// Collects payments.
///
/// Implementations report the outcome later by publishing
/// [`PaymentProcessorEvent::PaymentProcessed`] on the `payment_processor` topic.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn request(&self, payment: &Payment) -> Result<(), HandlerError>;
}

/// Records requests and leaves reporting the outcome to the caller.
#[derive(Clone, Default)]
pub struct RecordingPaymentProcessor {
    requested: Arc<RwLock<Vec<PaymentRef>>>,
}

impl RecordingPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// References of every payment requested so far, oldest first.
    pub async fn requested(&self) -> Vec<PaymentRef> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl PaymentProcessor for RecordingPaymentProcessor {
    async fn request(&self, payment: &Payment) -> Result<(), HandlerError> {
        tracing::debug!(payment_ref = %payment.reference(), amount = %payment.amount(), "payment recorded");
        self.requested.write().await.push(payment.reference().clone());
        Ok(())
    }
}

/// Reports a fixed outcome for every payment as soon as it is requested.
#[derive(Clone)]
pub struct AutoPaymentProcessor {
    log: Arc<dyn EventLog>,
    outcome: PaymentStatus,
}

impl AutoPaymentProcessor {
    pub fn new(log: Arc<dyn EventLog>, outcome: PaymentStatus) -> Self {
        Self { log, outcome }
    }

    pub fn approving(log: Arc<dyn EventLog>) -> Self {
        Self::new(log, PaymentStatus::Successful)
    }

    pub fn declining(log: Arc<dyn EventLog>) -> Self {
        Self::new(log, PaymentStatus::Failed)
    }

    pub fn outcome(&self) -> PaymentStatus {
        self.outcome
    }
}

#[async_trait]
impl PaymentProcessor for AutoPaymentProcessor {
    async fn request(&self, payment: &Payment) -> Result<(), HandlerError> {
        let event = PaymentProcessorEvent::PaymentProcessed {
            payment_ref: payment.reference().clone(),
            status: self.outcome,
        };
        self.log
            .publish(&PAYMENT_PROCESSOR_TOPIC, event.to_envelope()?)
            .await?;
        Ok(())
    }
}

impl PaymentProcessorEvent {
    /// Wraps the event in an envelope for the `payment_processor` topic.
    pub fn to_envelope(&self) -> event_log::Result<EventEnvelope> {
        EventEnvelope::builder()
            .event_type(self.event_type())
            .aggregate_ref(self.payment_ref().as_str())
            .aggregate_type("Payment")
            .payload(self)?
            .build()
    }
}
