use domain::Aggregate;
use serde::{Deserialize, Serialize};

use super::{KitchenOrderEvent, KitchenOrderState};
use crate::acl::ordering::OnlineOrderRef;
use crate::{KitchenError, PizzaSize};

common::define_ref! {
    /// Reference to a [`KitchenOrder`].
    pub KitchenOrderRef
}

/// The kitchen's work item for one paid online order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrder {
    reference: KitchenOrderRef,
    online_order_ref: OnlineOrderRef,
    /// Sizes of the ordered pizzas, in line-item order.
    pizzas: Vec<PizzaSize>,
    state: KitchenOrderState,
}

impl KitchenOrder {
    pub fn new(
        reference: KitchenOrderRef,
        online_order_ref: OnlineOrderRef,
        pizzas: Vec<PizzaSize>,
    ) -> Self {
        Self {
            reference,
            online_order_ref,
            pizzas,
            state: KitchenOrderState::New,
        }
    }

    pub fn reference(&self) -> &KitchenOrderRef {
        &self.reference
    }

    pub fn online_order_ref(&self) -> &OnlineOrderRef {
        &self.online_order_ref
    }

    pub fn pizzas(&self) -> &[PizzaSize] {
        &self.pizzas
    }

    pub fn state(&self) -> KitchenOrderState {
        self.state
    }

    pub fn is_assembled(&self) -> bool {
        self.state == KitchenOrderState::Assembled
    }

    pub fn start_prep(&self) -> Result<KitchenOrderEvent, KitchenError> {
        self.guard(self.state.can_start_prep(), "start prep")?;
        Ok(KitchenOrderEvent::KitchenOrderPrepStarted {
            reference: self.reference.clone(),
        })
    }

    pub fn start_bake(&self) -> Result<KitchenOrderEvent, KitchenError> {
        self.guard(self.state.can_start_bake(), "start bake")?;
        Ok(KitchenOrderEvent::KitchenOrderBakeStarted {
            reference: self.reference.clone(),
        })
    }

    pub fn start_assembly(&self) -> Result<KitchenOrderEvent, KitchenError> {
        self.guard(self.state.can_start_assembly(), "start assembly")?;
        Ok(KitchenOrderEvent::KitchenOrderAssemblyStarted {
            reference: self.reference.clone(),
        })
    }

    pub fn finish_assembly(&self) -> Result<KitchenOrderEvent, KitchenError> {
        self.guard(self.state.can_finish_assembly(), "finish assembly")?;
        Ok(KitchenOrderEvent::KitchenOrderAssemblyFinished {
            reference: self.reference.clone(),
        })
    }

    fn guard(&self, allowed: bool, action: &'static str) -> Result<(), KitchenError> {
        if !allowed {
            return Err(KitchenError::InvalidStateTransition {
                aggregate_type: Self::aggregate_type(),
                current_state: self.state.as_str(),
                action,
            });
        }
        Ok(())
    }
}

impl Aggregate for KitchenOrder {
    type Ref = KitchenOrderRef;
    type Event = KitchenOrderEvent;

    fn aggregate_type() -> &'static str {
        "KitchenOrder"
    }

    fn reference(&self) -> &KitchenOrderRef {
        &self.reference
    }

    fn added(&self) -> KitchenOrderEvent {
        KitchenOrderEvent::KitchenOrderAdded {
            order: self.clone(),
        }
    }

    fn from_added(event: &KitchenOrderEvent) -> Option<Self> {
        match event {
            KitchenOrderEvent::KitchenOrderAdded { order } => Some(order.clone()),
            _ => None,
        }
    }

    fn apply(&mut self, event: &KitchenOrderEvent) {
        match event {
            KitchenOrderEvent::KitchenOrderAdded { .. } => {}
            KitchenOrderEvent::KitchenOrderPrepStarted { .. } => {
                self.state = KitchenOrderState::Prepping;
            }
            KitchenOrderEvent::KitchenOrderBakeStarted { .. } => {
                self.state = KitchenOrderState::Baking;
            }
            KitchenOrderEvent::KitchenOrderAssemblyStarted { .. } => {
                self.state = KitchenOrderState::Assembling;
            }
            KitchenOrderEvent::KitchenOrderAssemblyFinished { .. } => {
                self.state = KitchenOrderState::Assembled;
            }
        }
    }
}
