//! Wiring of the four contexts over one event log.

use std::sync::Arc;

use delivery::{DELIVERY_ORDERS_TOPIC, DeliveryOrder, DeliveryService};
use domain::{Aggregate, EventSourcedRepository, MaterializedViewRepository, Repository};
use event_log::{EventLog, InProcessEventLog, Topic};
use kitchen::{KITCHEN_ORDERS_TOPIC, KitchenOrder, KitchenService, PIZZAS_TOPIC, Pizza};
use ordering::{ORDERING_TOPIC, OnlineOrder, OrderingService};
use payments::{
    AutoPaymentProcessor, PAYMENT_PROCESSOR_TOPIC, PAYMENTS_TOPIC, Payment, PaymentProcessor,
    PaymentProcessorEvent, PaymentRef, PaymentService, PaymentStatus, RecordingPaymentProcessor,
};

use crate::adapters::{
    KitchenForDelivery, OrderingForDelivery, OrderingForKitchen, PaymentsForOrdering,
};
use crate::{Config, PaymentProcessorMode, RepositoryStrategy, ShopError};

/// The whole shop: one event log and one service per context.
///
/// Every repository is subscribed before any service, so a service handling
/// an event always reads rows that already include it.
pub struct PizzaShop {
    config: Config,
    log: Arc<InProcessEventLog>,
    ordering: OrderingService,
    payments: PaymentService,
    kitchen: KitchenService,
    delivery: DeliveryService,
    recording_processor: Option<RecordingPaymentProcessor>,
}

impl PizzaShop {
    /// Builds and subscribes every context.
    pub async fn build(config: Config) -> Result<Self, ShopError> {
        config.validate()?;

        let log = Arc::new(if config.retain_event_log {
            InProcessEventLog::new()
        } else {
            InProcessEventLog::without_log()
        });
        let strategy = config.repository_strategy;

        let online_orders = repository::<OnlineOrder>(strategy, &log, ORDERING_TOPIC).await;
        let payment_rows = repository::<Payment>(strategy, &log, PAYMENTS_TOPIC).await;
        let kitchen_orders = repository::<KitchenOrder>(strategy, &log, KITCHEN_ORDERS_TOPIC).await;
        let pizzas = repository::<Pizza>(strategy, &log, PIZZAS_TOPIC).await;
        let delivery_orders =
            repository::<DeliveryOrder>(strategy, &log, DELIVERY_ORDERS_TOPIC).await;

        let recording_processor = (config.payment_processor == PaymentProcessorMode::Manual)
            .then(RecordingPaymentProcessor::new);
        let processor: Arc<dyn PaymentProcessor> = match config.payment_processor {
            PaymentProcessorMode::Manual => {
                Arc::new(recording_processor.clone().unwrap_or_default())
            }
            PaymentProcessorMode::Approve => Arc::new(AutoPaymentProcessor::approving(log.clone())),
            PaymentProcessorMode::Decline => Arc::new(AutoPaymentProcessor::declining(log.clone())),
        };

        let payments = PaymentService::new(log.clone(), payment_rows, processor);
        let ordering = OrderingService::new(
            log.clone(),
            online_orders,
            Arc::new(PaymentsForOrdering(payments.clone())),
        );
        let kitchen = KitchenService::new(
            log.clone(),
            kitchen_orders,
            pizzas,
            Arc::new(OrderingForKitchen(ordering.clone())),
        );
        let delivery = DeliveryService::new(
            log.clone(),
            delivery_orders,
            Arc::new(KitchenForDelivery(kitchen.clone())),
            Arc::new(OrderingForDelivery(ordering.clone())),
        );

        payments.subscribe().await;
        ordering.subscribe().await;
        kitchen.subscribe().await;
        delivery.subscribe().await;

        tracing::info!(
            ?strategy,
            retain_event_log = config.retain_event_log,
            payment_processor = ?config.payment_processor,
            "pizza shop ready"
        );

        Ok(Self {
            config,
            log,
            ordering,
            payments,
            kitchen,
            delivery,
            recording_processor,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn log(&self) -> &Arc<InProcessEventLog> {
        &self.log
    }

    pub fn ordering(&self) -> &OrderingService {
        &self.ordering
    }

    pub fn payments(&self) -> &PaymentService {
        &self.payments
    }

    pub fn kitchen(&self) -> &KitchenService {
        &self.kitchen
    }

    pub fn delivery(&self) -> &DeliveryService {
        &self.delivery
    }

    /// Payments handed to the manual processor, oldest first.
    ///
    /// Empty when an automatic processor is configured.
    pub async fn requested_payments(&self) -> Vec<PaymentRef> {
        match &self.recording_processor {
            Some(processor) => processor.requested().await,
            None => Vec::new(),
        }
    }

    /// Reports a processor outcome, as the payment processor would.
    #[tracing::instrument(skip(self))]
    pub async fn report_payment(
        &self,
        payment_ref: &PaymentRef,
        status: PaymentStatus,
    ) -> Result<(), ShopError> {
        let event = PaymentProcessorEvent::PaymentProcessed {
            payment_ref: payment_ref.clone(),
            status,
        };
        self.log
            .publish(&PAYMENT_PROCESSOR_TOPIC, event.to_envelope()?)
            .await?;
        Ok(())
    }

    /// Drops every subscription, releasing the services held by the log.
    pub async fn shutdown(self) {
        self.log.purge_subscribers().await;
        tracing::info!(events = self.log.event_count().await, "pizza shop closed");
    }
}

async fn repository<A: Aggregate>(
    strategy: RepositoryStrategy,
    log: &Arc<InProcessEventLog>,
    topic: Topic,
) -> Arc<dyn Repository<A>> {
    match strategy {
        RepositoryStrategy::MaterializedView => {
            Arc::new(MaterializedViewRepository::<A>::new(log.clone(), topic).await)
        }
        RepositoryStrategy::EventSourced => {
            Arc::new(EventSourcedRepository::<A>::new(log.clone(), topic))
        }
    }
}
