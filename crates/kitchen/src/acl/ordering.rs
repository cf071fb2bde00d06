//! Shadow of the Ordering context.

use async_trait::async_trait;
use event_log::{HandlerError, Topic};
use serde::{Deserialize, Serialize};

use crate::PizzaSize;

/// Topic on which Ordering publishes online order events.
pub const ORDERING_TOPIC: Topic = Topic::from_static("ordering");

common::define_ref! {
    /// Reference to an online order owned by the Ordering context.
    pub OnlineOrderRef
}

/// The parts of an online order the kitchen cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineOrder {
    pub reference: OnlineOrderRef,
    /// Pizza sizes in line-item order.
    pub pizzas: Vec<PizzaSize>,
}

/// The online order events the kitchen reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OnlineOrderEvent {
    OnlineOrderPaid {
        reference: OnlineOrderRef,
    },

    #[serde(other)]
    Other,
}

/// What the kitchen needs from the Ordering context.
#[async_trait]
pub trait OrderingService: Send + Sync {
    async fn find_by_ref(
        &self,
        reference: &OnlineOrderRef,
    ) -> Result<Option<OnlineOrder>, HandlerError>;
}
