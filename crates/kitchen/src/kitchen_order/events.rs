use domain::DomainEvent;
use serde::{Deserialize, Serialize};

use super::{KitchenOrder, KitchenOrderRef};

/// Events published on the `kitchen_orders` topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KitchenOrderEvent {
    KitchenOrderAdded { order: KitchenOrder },
    KitchenOrderPrepStarted { reference: KitchenOrderRef },
    KitchenOrderBakeStarted { reference: KitchenOrderRef },
    KitchenOrderAssemblyStarted { reference: KitchenOrderRef },
    KitchenOrderAssemblyFinished { reference: KitchenOrderRef },
}

impl DomainEvent for KitchenOrderEvent {
    type Ref = KitchenOrderRef;

    fn event_type(&self) -> &'static str {
        match self {
            KitchenOrderEvent::KitchenOrderAdded { .. } => "KitchenOrderAdded",
            KitchenOrderEvent::KitchenOrderPrepStarted { .. } => "KitchenOrderPrepStarted",
            KitchenOrderEvent::KitchenOrderBakeStarted { .. } => "KitchenOrderBakeStarted",
            KitchenOrderEvent::KitchenOrderAssemblyStarted { .. } => "KitchenOrderAssemblyStarted",
            KitchenOrderEvent::KitchenOrderAssemblyFinished { .. } => {
                "KitchenOrderAssemblyFinished"
            }
        }
    }

    fn reference(&self) -> &KitchenOrderRef {
        match self {
            KitchenOrderEvent::KitchenOrderAdded { order } => order.reference(),
            KitchenOrderEvent::KitchenOrderPrepStarted { reference }
            | KitchenOrderEvent::KitchenOrderBakeStarted { reference }
            | KitchenOrderEvent::KitchenOrderAssemblyStarted { reference }
            | KitchenOrderEvent::KitchenOrderAssemblyFinished { reference } => reference,
        }
    }
}
