//! Kitchen service.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{Repository, TopicPublisher};
use event_log::{EventEnvelope, EventHandler, EventLog, HandlerError, Topic};

use crate::acl::ordering::{ORDERING_TOPIC, OnlineOrderEvent, OnlineOrderRef, OrderingService};
use crate::{
    KITCHEN_ORDERS_TOPIC, KitchenError, KitchenOrder, KitchenOrderRef, KitchenOrderRepository,
    KitchenOrderState, PIZZAS_TOPIC, Pizza, PizzaEvent, PizzaRef, PizzaRepository, Result,
};

/// Runs the kitchen.
///
/// Reacts to `OnlineOrderPaid` on `ordering` and to its own pizza events on
/// `pizzas`.
#[derive(Clone)]
pub struct KitchenService {
    kitchen_orders: Arc<dyn Repository<KitchenOrder>>,
    pizzas: Arc<dyn Repository<Pizza>>,
    order_publisher: TopicPublisher,
    pizza_publisher: TopicPublisher,
    ordering: Arc<dyn OrderingService>,
}

impl KitchenService {
    pub fn new(
        log: Arc<dyn EventLog>,
        kitchen_orders: Arc<dyn Repository<KitchenOrder>>,
        pizzas: Arc<dyn Repository<Pizza>>,
        ordering: Arc<dyn OrderingService>,
    ) -> Self {
        Self {
            kitchen_orders,
            pizzas,
            order_publisher: TopicPublisher::new(log.clone(), KITCHEN_ORDERS_TOPIC),
            pizza_publisher: TopicPublisher::new(log, PIZZAS_TOPIC),
            ordering,
        }
    }

    /// Subscribes the service to the `ordering` and `pizzas` topics.
    ///
    /// The pizza repository must already be subscribed to `pizzas`.
    pub async fn subscribe(&self) {
        let log = self.order_publisher.log();
        log.subscribe(&ORDERING_TOPIC, Arc::new(self.clone())).await;
        log.subscribe(&PIZZAS_TOPIC, Arc::new(self.clone())).await;
    }

    /// Starts prepping a new kitchen order and every one of its pizzas.
    #[tracing::instrument(skip(self))]
    pub async fn start_order_prep(&self, reference: &KitchenOrderRef) -> Result<()> {
        let mut order = self.load_order(reference).await?;
        self.order_publisher
            .transition(&mut order, KitchenOrder::start_prep)
            .await?;

        for mut pizza in self.find_pizzas_by_kitchen_order_ref(reference).await? {
            self.pizza_publisher
                .transition(&mut pizza, Pizza::start_prep)
                .await?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn finish_pizza_prep(&self, reference: &PizzaRef) -> Result<()> {
        let mut pizza = self.load_pizza(reference).await?;
        self.pizza_publisher
            .transition(&mut pizza, Pizza::finish_prep)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_pizza_from_oven(&self, reference: &PizzaRef) -> Result<()> {
        let mut pizza = self.load_pizza(reference).await?;
        self.pizza_publisher
            .transition(&mut pizza, Pizza::finish_bake)
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn finish_order_assembly(&self, reference: &KitchenOrderRef) -> Result<()> {
        let mut order = self.load_order(reference).await?;
        self.order_publisher
            .transition(&mut order, KitchenOrder::finish_assembly)
            .await?;
        tracing::info!(kitchen_order_ref = %reference, "kitchen order assembled");
        Ok(())
    }

    pub async fn find_kitchen_order_by_ref(
        &self,
        reference: &KitchenOrderRef,
    ) -> Result<Option<KitchenOrder>> {
        Ok(self.kitchen_orders.find_by_ref(reference).await?)
    }

    pub async fn find_kitchen_order_by_online_order_ref(
        &self,
        online_order_ref: &OnlineOrderRef,
    ) -> Result<Option<KitchenOrder>> {
        Ok(self
            .kitchen_orders
            .find_by_online_order_ref(online_order_ref)
            .await?)
    }

    pub async fn find_pizza_by_ref(&self, reference: &PizzaRef) -> Result<Option<Pizza>> {
        Ok(self.pizzas.find_by_ref(reference).await?)
    }

    pub async fn find_pizzas_by_kitchen_order_ref(
        &self,
        reference: &KitchenOrderRef,
    ) -> Result<Vec<Pizza>> {
        Ok(self.pizzas.find_by_kitchen_order_ref(reference).await?)
    }

    async fn load_order(&self, reference: &KitchenOrderRef) -> Result<KitchenOrder> {
        self.find_kitchen_order_by_ref(reference)
            .await?
            .ok_or_else(|| KitchenError::KitchenOrderNotFound(reference.clone()))
    }

    async fn load_pizza(&self, reference: &PizzaRef) -> Result<Pizza> {
        self.find_pizza_by_ref(reference)
            .await?
            .ok_or_else(|| KitchenError::PizzaNotFound(reference.clone()))
    }

    /// Creates the kitchen order and its pizzas for a paid online order.
    async fn on_online_order_paid(&self, online_order_ref: &OnlineOrderRef) -> Result<()> {
        if self
            .find_kitchen_order_by_online_order_ref(online_order_ref)
            .await?
            .is_some()
        {
            tracing::debug!(%online_order_ref, "kitchen order already exists");
            return Ok(());
        }

        let online_order = self
            .ordering
            .find_by_ref(online_order_ref)
            .await
            .map_err(KitchenError::OrderingService)?
            .ok_or_else(|| KitchenError::UnknownForeignRef {
                kind: "online order",
                reference: online_order_ref.to_string(),
            })?;

        let order = KitchenOrder::new(
            self.kitchen_orders.next_identity(),
            online_order.reference,
            online_order.pizzas,
        );
        self.kitchen_orders.add(&order).await?;

        for size in order.pizzas() {
            let pizza = Pizza::new(self.pizzas.next_identity(), order.reference().clone(), *size);
            self.pizzas.add(&pizza).await?;
        }

        tracing::info!(
            kitchen_order_ref = %order.reference(),
            %online_order_ref,
            pizzas = order.pizzas().len(),
            "kitchen order created"
        );
        Ok(())
    }

    /// Moves the kitchen order along once every pizza has caught up.
    async fn on_pizza_event(&self, event: PizzaEvent) -> Result<()> {
        let reference = match &event {
            PizzaEvent::PizzaPrepFinished { reference }
            | PizzaEvent::PizzaBakeFinished { reference } => reference,
            _ => return Ok(()),
        };

        let pizza = self.load_pizza(reference).await?;
        let mut order = self.load_order(pizza.kitchen_order_ref()).await?;
        let pizzas = self.find_pizzas_by_kitchen_order_ref(order.reference()).await?;
        let caught_up = match event {
            PizzaEvent::PizzaPrepFinished { .. } => pizzas.iter().all(Pizza::is_prepped),
            _ => pizzas.iter().all(Pizza::is_baked),
        };
        if !caught_up {
            return Ok(());
        }

        match order.state() {
            KitchenOrderState::Prepping => {
                self.order_publisher
                    .transition(&mut order, KitchenOrder::start_bake)
                    .await?;
                for mut pizza in pizzas {
                    self.pizza_publisher
                        .transition(&mut pizza, Pizza::start_bake)
                        .await?;
                }
            }
            KitchenOrderState::Baking => {
                self.order_publisher
                    .transition(&mut order, KitchenOrder::start_assembly)
                    .await?;
            }
            state => {
                tracing::debug!(
                    kitchen_order_ref = %order.reference(),
                    %state,
                    "kitchen order not waiting on pizzas"
                );
            }
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for KitchenService {
    async fn handle(
        &self,
        topic: &Topic,
        event: &EventEnvelope,
    ) -> std::result::Result<(), HandlerError> {
        if *topic == ORDERING_TOPIC {
            if let OnlineOrderEvent::OnlineOrderPaid { reference } =
                event.decode::<OnlineOrderEvent>()?
            {
                self.on_online_order_paid(&reference).await?;
            }
        } else if *topic == PIZZAS_TOPIC {
            self.on_pizza_event(event.decode::<PizzaEvent>()?).await?;
        }
        Ok(())
    }
}
