//! Shadow of the Kitchen context.

use async_trait::async_trait;
use event_log::{HandlerError, Topic};
use serde::{Deserialize, Serialize};

use crate::Pizza;
use crate::acl::ordering::OnlineOrderRef;

/// Topic on which Kitchen publishes kitchen order events.
pub const KITCHEN_ORDERS_TOPIC: Topic = Topic::from_static("kitchen_orders");

common::define_ref! {
    /// Reference to a kitchen order owned by the Kitchen context.
    pub KitchenOrderRef
}

/// The parts of a kitchen order Delivery copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenOrder {
    pub reference: KitchenOrderRef,
    pub online_order_ref: OnlineOrderRef,
    pub pizzas: Vec<Pizza>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KitchenOrderEvent {
    KitchenOrderAssemblyFinished {
        reference: KitchenOrderRef,
    },

    #[serde(other)]
    Other,
}

/// What Delivery needs from the Kitchen context.
#[async_trait]
pub trait KitchenService: Send + Sync {
    async fn find_kitchen_order_by_ref(
        &self,
        reference: &KitchenOrderRef,
    ) -> Result<Option<KitchenOrder>, HandlerError>;
}
