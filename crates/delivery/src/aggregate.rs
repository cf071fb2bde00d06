//! Delivery order aggregate.

use domain::{Aggregate, DomainEvent};
use serde::{Deserialize, Serialize};

use crate::acl::kitchen::KitchenOrderRef;
use crate::acl::ordering::OnlineOrderRef;

common::define_ref! {
    /// Reference to a [`DeliveryOrder`].
    pub DeliveryOrderRef
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

/// A pizza to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pizza {
    pub size: PizzaSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryOrderState {
    #[default]
    New,
}

impl std::fmt::Display for DeliveryOrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryOrderState::New => f.write_str("NEW"),
        }
    }
}

/// An order waiting to go out for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOrder {
    reference: DeliveryOrderRef,
    kitchen_order_ref: KitchenOrderRef,
    online_order_ref: OnlineOrderRef,
    pizzas: Vec<Pizza>,
    state: DeliveryOrderState,
}

impl DeliveryOrder {
    pub fn new(
        reference: DeliveryOrderRef,
        kitchen_order_ref: KitchenOrderRef,
        online_order_ref: OnlineOrderRef,
        pizzas: Vec<Pizza>,
    ) -> Self {
        Self {
            reference,
            kitchen_order_ref,
            online_order_ref,
            pizzas,
            state: DeliveryOrderState::New,
        }
    }

    pub fn reference(&self) -> &DeliveryOrderRef {
        &self.reference
    }

    pub fn kitchen_order_ref(&self) -> &KitchenOrderRef {
        &self.kitchen_order_ref
    }

    pub fn online_order_ref(&self) -> &OnlineOrderRef {
        &self.online_order_ref
    }

    pub fn pizzas(&self) -> &[Pizza] {
        &self.pizzas
    }

    pub fn state(&self) -> DeliveryOrderState {
        self.state
    }
}

/// Events published on the `delivery_orders` topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeliveryOrderEvent {
    DeliveryOrderAdded { order: DeliveryOrder },
}

impl DomainEvent for DeliveryOrderEvent {
    type Ref = DeliveryOrderRef;

    fn event_type(&self) -> &'static str {
        match self {
            DeliveryOrderEvent::DeliveryOrderAdded { .. } => "DeliveryOrderAdded",
        }
    }

    fn reference(&self) -> &DeliveryOrderRef {
        match self {
            DeliveryOrderEvent::DeliveryOrderAdded { order } => order.reference(),
        }
    }
}

impl Aggregate for DeliveryOrder {
    type Ref = DeliveryOrderRef;
    type Event = DeliveryOrderEvent;

    fn aggregate_type() -> &'static str {
        "DeliveryOrder"
    }

    fn reference(&self) -> &DeliveryOrderRef {
        &self.reference
    }

    fn added(&self) -> DeliveryOrderEvent {
        DeliveryOrderEvent::DeliveryOrderAdded {
            order: self.clone(),
        }
    }

    fn from_added(event: &DeliveryOrderEvent) -> Option<Self> {
        let DeliveryOrderEvent::DeliveryOrderAdded { order } = event;
        Some(order.clone())
    }

    // Delivery orders have no transitions yet.
    fn apply(&mut self, _event: &DeliveryOrderEvent) {}
}
