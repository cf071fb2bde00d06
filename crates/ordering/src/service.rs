//! Ordering service: the context's public operations and its subscriptions.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Repository, TopicPublisher};
use event_log::{EventEnvelope, EventHandler, EventLog, HandlerError, Topic};

use crate::acl::payments::{PAYMENTS_TOPIC, PaymentEvent, PaymentRef, PaymentService};
use crate::{
    ORDERING_TOPIC, OnlineOrder, OnlineOrderRef, OnlineOrderRepository, OnlineOrderType,
    OrderingError, Pizza, Result,
};

/// Service for managing online orders.
///
/// Cloning is cheap; clones share the repository, the log and the payment
/// service.
#[derive(Clone)]
pub struct OrderingService {
    orders: Arc<dyn Repository<OnlineOrder>>,
    publisher: TopicPublisher,
    payments: Arc<dyn PaymentService>,
}

impl OrderingService {
    pub fn new(
        log: Arc<dyn EventLog>,
        orders: Arc<dyn Repository<OnlineOrder>>,
        payments: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            orders,
            publisher: TopicPublisher::new(log, ORDERING_TOPIC),
            payments,
        }
    }

    /// Subscribes the service to the `payments` topic.
    pub async fn subscribe(&self) {
        self.publisher
            .log()
            .subscribe(&PAYMENTS_TOPIC, Arc::new(self.clone()))
            .await;
    }

    /// Creates and stores a new, empty order.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, order_type: OnlineOrderType) -> Result<OnlineOrderRef> {
        let order = OnlineOrder::new(self.orders.next_identity(), order_type);
        self.orders.add(&order).await?;

        tracing::info!(order_ref = %order.reference(), "online order created");
        Ok(order.reference().clone())
    }

    /// Adds a pizza to a new order.
    #[tracing::instrument(skip(self))]
    pub async fn add_pizza(&self, reference: &OnlineOrderRef, pizza: Pizza) -> Result<()> {
        let mut order = self.load(reference).await?;
        self.publisher
            .transition(&mut order, |order| order.add_pizza(pizza))
            .await?;
        Ok(())
    }

    /// Submits an order holding at least one pizza.
    #[tracing::instrument(skip(self))]
    pub async fn submit_order(&self, reference: &OnlineOrderRef) -> Result<()> {
        let mut order = self.load(reference).await?;
        self.publisher
            .transition(&mut order, OnlineOrder::submit)
            .await?;
        Ok(())
    }

    /// Creates a payment for the order total, records it on the order and
    /// asks Payments to collect it.
    ///
    /// The order must be submitted and must not have a payment yet; otherwise
    /// no payment is created.
    #[tracing::instrument(skip(self))]
    pub async fn request_payment(&self, reference: &OnlineOrderRef) -> Result<PaymentRef> {
        let mut order = self.load(reference).await?;

        if !order.state().can_assign_payment_ref() {
            return Err(OrderingError::InvalidStateTransition {
                current_state: order.state(),
                action: "request payment",
            });
        }
        if !order.payment_ref().is_identity() {
            return Err(OrderingError::PaymentRefAlreadyAssigned(
                order.payment_ref().to_string(),
            ));
        }

        let payment_ref = self
            .payments
            .create_payment_of(order.total())
            .await
            .map_err(OrderingError::PaymentService)?;

        let assigned = payment_ref.clone();
        self.publisher
            .transition(&mut order, move |order| order.assign_payment_ref(assigned))
            .await?;

        self.payments
            .request_payment_for(&payment_ref)
            .await
            .map_err(OrderingError::PaymentService)?;

        tracing::info!(%payment_ref, total = %order.total(), "payment requested");
        Ok(payment_ref)
    }

    pub async fn find_by_ref(&self, reference: &OnlineOrderRef) -> Result<Option<OnlineOrder>> {
        Ok(self.orders.find_by_ref(reference).await?)
    }

    pub async fn find_by_payment_ref(&self, payment_ref: &PaymentRef) -> Result<Option<OnlineOrder>> {
        Ok(self.orders.find_by_payment_ref(payment_ref).await?)
    }

    async fn load(&self, reference: &OnlineOrderRef) -> Result<OnlineOrder> {
        self.orders
            .find_by_ref(reference)
            .await?
            .ok_or_else(|| OrderingError::NotFound(reference.clone()))
    }

    async fn on_payment_successful(&self, payment_ref: &PaymentRef) -> Result<()> {
        let Some(mut order) = self.find_by_payment_ref(payment_ref).await? else {
            tracing::debug!(%payment_ref, "payment does not belong to an online order");
            return Ok(());
        };

        self.publisher
            .transition(&mut order, OnlineOrder::mark_paid)
            .await?;
        tracing::info!(order_ref = %order.reference(), "online order paid");
        Ok(())
    }
}

#[async_trait]
impl EventHandler for OrderingService {
    async fn handle(&self, topic: &Topic, event: &EventEnvelope) -> std::result::Result<(), HandlerError> {
        if *topic != PAYMENTS_TOPIC {
            return Ok(());
        }

        match event.decode::<PaymentEvent>()? {
            PaymentEvent::PaymentSuccessful { reference } => {
                self.on_payment_successful(&reference).await?;
            }
            PaymentEvent::Other => {}
        }
        Ok(())
    }
}
