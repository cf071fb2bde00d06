use domain::Aggregate;
use serde::{Deserialize, Serialize};

use super::{PizzaEvent, PizzaState};
use crate::{KitchenError, KitchenOrderRef};

common::define_ref! {
    /// Reference to a [`Pizza`].
    pub PizzaRef
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

/// A pizza being made for a kitchen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    reference: PizzaRef,
    kitchen_order_ref: KitchenOrderRef,
    size: PizzaSize,
    state: PizzaState,
}

impl Pizza {
    pub fn new(reference: PizzaRef, kitchen_order_ref: KitchenOrderRef, size: PizzaSize) -> Self {
        Self {
            reference,
            kitchen_order_ref,
            size,
            state: PizzaState::New,
        }
    }

    pub fn reference(&self) -> &PizzaRef {
        &self.reference
    }

    pub fn kitchen_order_ref(&self) -> &KitchenOrderRef {
        &self.kitchen_order_ref
    }

    pub fn size(&self) -> PizzaSize {
        self.size
    }

    pub fn state(&self) -> PizzaState {
        self.state
    }

    pub fn is_prepped(&self) -> bool {
        self.state == PizzaState::Prepped
    }

    pub fn is_baked(&self) -> bool {
        self.state == PizzaState::Baked
    }

    pub fn start_prep(&self) -> Result<PizzaEvent, KitchenError> {
        self.guard(self.state.can_start_prep(), "start prep")?;
        Ok(PizzaEvent::PizzaPrepStarted {
            reference: self.reference.clone(),
        })
    }

    pub fn finish_prep(&self) -> Result<PizzaEvent, KitchenError> {
        self.guard(self.state.can_finish_prep(), "finish prep")?;
        Ok(PizzaEvent::PizzaPrepFinished {
            reference: self.reference.clone(),
        })
    }

    /// Puts a prepped pizza in the oven.
    pub fn start_bake(&self) -> Result<PizzaEvent, KitchenError> {
        self.guard(self.state.can_start_bake(), "start bake")?;
        Ok(PizzaEvent::PizzaBakeStarted {
            reference: self.reference.clone(),
        })
    }

    /// Takes a baking pizza out of the oven.
    pub fn finish_bake(&self) -> Result<PizzaEvent, KitchenError> {
        self.guard(self.state.can_finish_bake(), "finish bake")?;
        Ok(PizzaEvent::PizzaBakeFinished {
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

impl Aggregate for Pizza {
    type Ref = PizzaRef;
    type Event = PizzaEvent;

    fn aggregate_type() -> &'static str {
        "Pizza"
    }

    fn reference(&self) -> &PizzaRef {
        &self.reference
    }

    fn added(&self) -> PizzaEvent {
        PizzaEvent::PizzaAdded {
            pizza: self.clone(),
        }
    }

    fn from_added(event: &PizzaEvent) -> Option<Self> {
        match event {
            PizzaEvent::PizzaAdded { pizza } => Some(pizza.clone()),
            _ => None,
        }
    }

    fn apply(&mut self, event: &PizzaEvent) {
        self.state = match event {
            PizzaEvent::PizzaAdded { .. } => return,
            PizzaEvent::PizzaPrepStarted { .. } => PizzaState::Prepping,
            PizzaEvent::PizzaPrepFinished { .. } => PizzaState::Prepped,
            PizzaEvent::PizzaBakeStarted { .. } => PizzaState::Baking,
            PizzaEvent::PizzaBakeFinished { .. } => PizzaState::Baked,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(
        pizza: &mut Pizza,
        decide: impl FnOnce(&Pizza) -> Result<PizzaEvent, KitchenError>,
    ) -> PizzaEvent {
        let event = decide(&*pizza).unwrap();
        pizza.apply(&event);
        event
    }

    #[test]
    fn pizza_is_prepped_then_baked() {
        let mut pizza = Pizza::new(
            PizzaRef::generate(),
            KitchenOrderRef::generate(),
            PizzaSize::Large,
        );
        let history = vec![
            pizza.added(),
            step(&mut pizza, Pizza::start_prep),
            step(&mut pizza, Pizza::finish_prep),
        ];
        assert!(pizza.is_prepped());
        assert_eq!(Pizza::replay(&history), Some(pizza.clone()));

        step(&mut pizza, Pizza::start_bake);
        step(&mut pizza, Pizza::finish_bake);
        assert!(pizza.is_baked());
    }

    #[test]
    fn cannot_bake_before_prep_is_finished() {
        let mut pizza = Pizza::new(
            PizzaRef::generate(),
            KitchenOrderRef::generate(),
            PizzaSize::Small,
        );
        step(&mut pizza, Pizza::start_prep);

        assert!(matches!(
            pizza.start_bake(),
            Err(KitchenError::InvalidStateTransition {
                aggregate_type: "Pizza",
                current_state: "PREPPING",
                ..
            })
        ));
        assert_eq!(pizza.state(), PizzaState::Prepping);
    }

    #[test]
    fn state_is_stored_as_code() {
        let pizza = Pizza::new(
            PizzaRef::new("P"),
            KitchenOrderRef::new("K"),
            PizzaSize::Medium,
        );
        assert_eq!(
            serde_json::to_value(&pizza).unwrap(),
            serde_json::json!({
                "reference": "P",
                "kitchen_order_ref": "K",
                "size": "MEDIUM",
                "state": "NEW"
            })
        );
    }
}
