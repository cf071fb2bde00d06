//! Delivery service.

use std::sync::Arc;

use async_trait::async_trait;
use domain::Repository;
use event_log::{EventEnvelope, EventHandler, EventLog, HandlerError, Topic};

use crate::acl::kitchen::{KITCHEN_ORDERS_TOPIC, KitchenOrderEvent, KitchenOrderRef, KitchenService};
use crate::acl::ordering::OrderingService;
use crate::{DeliveryError, DeliveryOrder, DeliveryOrderRef, DeliveryOrderRepository, Result};

/// Creates delivery orders for assembled kitchen orders.
#[derive(Clone)]
pub struct DeliveryService {
    log: Arc<dyn EventLog>,
    delivery_orders: Arc<dyn Repository<DeliveryOrder>>,
    kitchen: Arc<dyn KitchenService>,
    ordering: Arc<dyn OrderingService>,
}

impl DeliveryService {
    pub fn new(
        log: Arc<dyn EventLog>,
        delivery_orders: Arc<dyn Repository<DeliveryOrder>>,
        kitchen: Arc<dyn KitchenService>,
        ordering: Arc<dyn OrderingService>,
    ) -> Self {
        Self {
            log,
            delivery_orders,
            kitchen,
            ordering,
        }
    }

    /// Subscribes the service to the `kitchen_orders` topic.
    pub async fn subscribe(&self) {
        self.log
            .subscribe(&KITCHEN_ORDERS_TOPIC, Arc::new(self.clone()))
            .await;
    }

    pub async fn find_delivery_order_by_ref(
        &self,
        reference: &DeliveryOrderRef,
    ) -> Result<Option<DeliveryOrder>> {
        Ok(self.delivery_orders.find_by_ref(reference).await?)
    }

    pub async fn find_delivery_order_by_kitchen_order_ref(
        &self,
        kitchen_order_ref: &KitchenOrderRef,
    ) -> Result<Option<DeliveryOrder>> {
        Ok(self
            .delivery_orders
            .find_by_kitchen_order_ref(kitchen_order_ref)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn on_assembly_finished(&self, kitchen_order_ref: &KitchenOrderRef) -> Result<()> {
        if self
            .find_delivery_order_by_kitchen_order_ref(kitchen_order_ref)
            .await?
            .is_some()
        {
            tracing::debug!("delivery order already exists");
            return Ok(());
        }

        let kitchen_order = self
            .kitchen
            .find_kitchen_order_by_ref(kitchen_order_ref)
            .await
            .map_err(DeliveryError::KitchenService)?
            .ok_or_else(|| DeliveryError::UnknownForeignRef {
                kind: "kitchen order",
                reference: kitchen_order_ref.to_string(),
            })?;

        let online_order = self
            .ordering
            .find_by_ref(&kitchen_order.online_order_ref)
            .await
            .map_err(DeliveryError::OrderingService)?
            .ok_or_else(|| DeliveryError::UnknownForeignRef {
                kind: "online order",
                reference: kitchen_order.online_order_ref.to_string(),
            })?;

        let order = DeliveryOrder::new(
            self.delivery_orders.next_identity(),
            kitchen_order.reference,
            online_order.reference,
            kitchen_order.pizzas,
        );
        self.delivery_orders.add(&order).await?;

        tracing::info!(
            delivery_order_ref = %order.reference(),
            online_order_ref = %order.online_order_ref(),
            order_type = ?online_order.order_type,
            "delivery order created"
        );
        Ok(())
    }
}

#[async_trait]
impl EventHandler for DeliveryService {
    async fn handle(
        &self,
        topic: &Topic,
        event: &EventEnvelope,
    ) -> std::result::Result<(), HandlerError> {
        if *topic != KITCHEN_ORDERS_TOPIC {
            return Ok(());
        }

        if let KitchenOrderEvent::KitchenOrderAssemblyFinished { reference } =
            event.decode::<KitchenOrderEvent>()?
        {
            self.on_assembly_finished(&reference).await?;
        }
        Ok(())
    }
}
