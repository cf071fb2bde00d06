//! Payment service.

use std::sync::Arc;

use async_trait::async_trait;
use common::Amount;
use domain::{Repository, TopicPublisher};
use event_log::{EventEnvelope, EventHandler, EventLog, HandlerError, Topic};

use crate::{
    PAYMENT_PROCESSOR_TOPIC, PAYMENTS_TOPIC, Payment, PaymentProcessor, PaymentProcessorEvent,
    PaymentRef, PaymentStatus, PaymentsError, Result,
};

/// Creates payments, hands them to the processor and records the outcome.
#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn Repository<Payment>>,
    publisher: TopicPublisher,
    processor: Arc<dyn PaymentProcessor>,
}

impl PaymentService {
    pub fn new(
        log: Arc<dyn EventLog>,
        payments: Arc<dyn Repository<Payment>>,
        processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            payments,
            publisher: TopicPublisher::new(log, PAYMENTS_TOPIC),
            processor,
        }
    }

    /// Subscribes the service to the `payment_processor` topic.
    pub async fn subscribe(&self) {
        self.publisher
            .log()
            .subscribe(&PAYMENT_PROCESSOR_TOPIC, Arc::new(self.clone()))
            .await;
    }

    /// Creates and stores a new payment for `amount`.
    #[tracing::instrument(skip(self))]
    pub async fn create_payment_of(&self, amount: Amount) -> Result<PaymentRef> {
        let payment = Payment::new(self.payments.next_identity(), amount)?;
        self.payments.add(&payment).await?;

        tracing::info!(payment_ref = %payment.reference(), "payment created");
        Ok(payment.reference().clone())
    }

    /// Marks the payment requested and passes it to the processor.
    #[tracing::instrument(skip(self))]
    pub async fn request_payment_for(&self, reference: &PaymentRef) -> Result<()> {
        let mut payment = self.load(reference).await?;
        self.publisher
            .transition(&mut payment, Payment::request)
            .await?;

        self.processor
            .request(&payment)
            .await
            .map_err(PaymentsError::Processor)
    }

    pub async fn find_by_ref(&self, reference: &PaymentRef) -> Result<Option<Payment>> {
        Ok(self.payments.find_by_ref(reference).await?)
    }

    async fn load(&self, reference: &PaymentRef) -> Result<Payment> {
        self.payments
            .find_by_ref(reference)
            .await?
            .ok_or_else(|| PaymentsError::NotFound(reference.clone()))
    }

    async fn on_payment_processed(
        &self,
        reference: &PaymentRef,
        status: PaymentStatus,
    ) -> Result<()> {
        let Some(mut payment) = self.find_by_ref(reference).await? else {
            tracing::warn!(payment_ref = %reference, "processor reported an unknown payment");
            return Ok(());
        };

        match status {
            PaymentStatus::Successful => {
                self.publisher
                    .transition(&mut payment, Payment::mark_successful)
                    .await?;
            }
            PaymentStatus::Failed => {
                self.publisher
                    .transition(&mut payment, Payment::mark_failed)
                    .await?;
            }
        }
        tracing::info!(payment_ref = %reference, state = %payment.state(), "payment settled");
        Ok(())
    }
}

#[async_trait]
impl EventHandler for PaymentService {
    async fn handle(
        &self,
        topic: &Topic,
        event: &EventEnvelope,
    ) -> std::result::Result<(), HandlerError> {
        if *topic != PAYMENT_PROCESSOR_TOPIC {
            return Ok(());
        }

        let PaymentProcessorEvent::PaymentProcessed {
            payment_ref,
            status,
        } = event.decode::<PaymentProcessorEvent>()?;
        self.on_payment_processed(&payment_ref, status).await?;
        Ok(())
    }
}
