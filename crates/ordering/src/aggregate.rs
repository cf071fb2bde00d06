//! Online order aggregate implementation.

use common::Amount;
use domain::Aggregate;
use serde::{Deserialize, Serialize};

use crate::acl::payments::PaymentRef;
use crate::{
    OnlineOrderEvent, OnlineOrderRef, OnlineOrderState, OnlineOrderType, OrderingError, Pizza,
};

/// Online order aggregate root.
///
/// Created `New` with no pizzas and no payment reference. The payment
/// reference stays at its identity value until a payment is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineOrder {
    reference: OnlineOrderRef,
    order_type: OnlineOrderType,
    /// Line items in the order they were added.
    pizzas: Vec<Pizza>,
    state: OnlineOrderState,
    payment_ref: PaymentRef,
}

impl OnlineOrder {
    /// Creates a new, empty order.
    pub fn new(reference: OnlineOrderRef, order_type: OnlineOrderType) -> Self {
        Self {
            reference,
            order_type,
            pizzas: Vec::new(),
            state: OnlineOrderState::New,
            payment_ref: PaymentRef::IDENTITY,
        }
    }
}

impl Aggregate for OnlineOrder {
    type Ref = OnlineOrderRef;
    type Event = OnlineOrderEvent;

    fn aggregate_type() -> &'static str {
        "OnlineOrder"
    }

    fn reference(&self) -> &OnlineOrderRef {
        &self.reference
    }

    fn added(&self) -> OnlineOrderEvent {
        OnlineOrderEvent::OnlineOrderAdded {
            order: self.clone(),
        }
    }

    fn from_added(event: &OnlineOrderEvent) -> Option<Self> {
        match event {
            OnlineOrderEvent::OnlineOrderAdded { order } => Some(order.clone()),
            _ => None,
        }
    }

    fn apply(&mut self, event: &OnlineOrderEvent) {
        match event {
            OnlineOrderEvent::OnlineOrderAdded { .. } => {}
            OnlineOrderEvent::OnlineOrderPizzaAdded { pizza, .. } => self.pizzas.push(*pizza),
            OnlineOrderEvent::OnlineOrderSubmitted { .. } => {
                self.state = OnlineOrderState::Submitted;
            }
            OnlineOrderEvent::PaymentRefAssigned { payment_ref, .. } => {
                self.payment_ref = payment_ref.clone();
            }
            OnlineOrderEvent::OnlineOrderPaid { .. } => {
                self.state = OnlineOrderState::Paid;
            }
        }
    }
}

// Query methods
impl OnlineOrder {
    pub fn reference(&self) -> &OnlineOrderRef {
        &self.reference
    }

    pub fn order_type(&self) -> OnlineOrderType {
        self.order_type
    }

    pub fn pizzas(&self) -> &[Pizza] {
        &self.pizzas
    }

    pub fn state(&self) -> OnlineOrderState {
        self.state
    }

    /// Returns the payment reference, or the identity value if none is assigned.
    pub fn payment_ref(&self) -> &PaymentRef {
        &self.payment_ref
    }

    pub fn is_submitted(&self) -> bool {
        self.state == OnlineOrderState::Submitted
    }

    pub fn is_paid(&self) -> bool {
        self.state == OnlineOrderState::Paid
    }

    /// Sum of the menu prices of every pizza.
    pub fn total(&self) -> Amount {
        self.pizzas.iter().map(Pizza::price).sum()
    }
}

// Command methods (return events)
impl OnlineOrder {
    /// Adds a pizza to a new order.
    pub fn add_pizza(&self, pizza: Pizza) -> Result<OnlineOrderEvent, OrderingError> {
        self.guard(self.state.can_add_pizza(), "add pizza")?;

        Ok(OnlineOrderEvent::OnlineOrderPizzaAdded {
            reference: self.reference.clone(),
            pizza,
        })
    }

    /// Submits the order. It must hold at least one pizza.
    pub fn submit(&self) -> Result<OnlineOrderEvent, OrderingError> {
        self.guard(self.state.can_submit(), "submit")?;

        if self.pizzas.is_empty() {
            return Err(OrderingError::NoPizzas);
        }

        Ok(OnlineOrderEvent::OnlineOrderSubmitted {
            reference: self.reference.clone(),
        })
    }

    /// Records the payment created for a submitted order.
    pub fn assign_payment_ref(
        &self,
        payment_ref: PaymentRef,
    ) -> Result<OnlineOrderEvent, OrderingError> {
        self.guard(self.state.can_assign_payment_ref(), "assign payment ref")?;

        if payment_ref.is_identity() {
            return Err(OrderingError::PaymentRefRequired);
        }
        if !self.payment_ref.is_identity() {
            return Err(OrderingError::PaymentRefAlreadyAssigned(
                self.payment_ref.to_string(),
            ));
        }

        Ok(OnlineOrderEvent::PaymentRefAssigned {
            reference: self.reference.clone(),
            payment_ref,
        })
    }

    /// Marks a submitted order with an assigned payment as paid.
    pub fn mark_paid(&self) -> Result<OnlineOrderEvent, OrderingError> {
        self.guard(self.state.can_mark_paid(), "mark paid")?;

        if self.payment_ref.is_identity() {
            return Err(OrderingError::PaymentRefRequired);
        }

        Ok(OnlineOrderEvent::OnlineOrderPaid {
            reference: self.reference.clone(),
        })
    }

    fn guard(&self, allowed: bool, action: &'static str) -> Result<(), OrderingError> {
        if !allowed {
            return Err(OrderingError::InvalidStateTransition {
                current_state: self.state,
                action,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PizzaSize;

    fn new_order() -> OnlineOrder {
        OnlineOrder::new(OnlineOrderRef::generate(), OnlineOrderType::Pickup)
    }

    /// Decides and applies one transition, returning the event.
    fn step(
        order: &mut OnlineOrder,
        decide: impl FnOnce(&OnlineOrder) -> Result<OnlineOrderEvent, OrderingError>,
    ) -> OnlineOrderEvent {
        let event = decide(&*order).unwrap();
        order.apply(&event);
        event
    }

    fn submitted_order() -> OnlineOrder {
        let mut order = new_order();
        step(&mut order, |o| o.add_pizza(Pizza::of(PizzaSize::Medium)));
        step(&mut order, OnlineOrder::submit);
        order
    }

    #[test]
    fn new_order_is_empty() {
        let order = new_order();
        assert_eq!(order.state(), OnlineOrderState::New);
        assert!(order.pizzas().is_empty());
        assert!(order.payment_ref().is_identity());
        assert_eq!(order.total(), Amount::zero());
    }

    #[test]
    fn add_pizza_keeps_line_item_order() {
        let mut order = new_order();
        step(&mut order, |o| o.add_pizza(Pizza::of(PizzaSize::Large)));
        step(&mut order, |o| o.add_pizza(Pizza::of(PizzaSize::Small)));

        assert_eq!(
            order.pizzas(),
            &[Pizza::of(PizzaSize::Large), Pizza::of(PizzaSize::Small)]
        );
        assert_eq!(order.total(), Amount::of(20, 0));
    }

    #[test]
    fn submit_requires_pizzas() {
        let order = new_order();
        assert!(matches!(order.submit(), Err(OrderingError::NoPizzas)));
    }

    #[test]
    fn submit_moves_to_submitted() {
        let order = submitted_order();
        assert!(order.is_submitted());
    }

    #[test]
    fn cannot_add_pizza_after_submit() {
        let order = submitted_order();
        let result = order.add_pizza(Pizza::of(PizzaSize::Small));
        assert!(matches!(
            result,
            Err(OrderingError::InvalidStateTransition {
                current_state: OnlineOrderState::Submitted,
                action: "add pizza"
            })
        ));
    }

    #[test]
    fn cannot_submit_twice() {
        let order = submitted_order();
        assert!(matches!(
            order.submit(),
            Err(OrderingError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn assign_payment_ref_requires_submitted() {
        let order = new_order();
        assert!(matches!(
            order.assign_payment_ref(PaymentRef::generate()),
            Err(OrderingError::InvalidStateTransition {
                current_state: OnlineOrderState::New,
                ..
            })
        ));
    }

    #[test]
    fn assign_payment_ref_rejects_identity_and_reassignment() {
        let mut order = submitted_order();
        assert!(matches!(
            order.assign_payment_ref(PaymentRef::IDENTITY),
            Err(OrderingError::PaymentRefRequired)
        ));

        let payment_ref = PaymentRef::generate();
        let assigned = payment_ref.clone();
        step(&mut order, move |o| o.assign_payment_ref(assigned));
        assert_eq!(order.payment_ref(), &payment_ref);

        assert!(matches!(
            order.assign_payment_ref(PaymentRef::generate()),
            Err(OrderingError::PaymentRefAlreadyAssigned(_))
        ));
    }

    #[test]
    fn mark_paid_requires_payment_ref() {
        let mut order = submitted_order();
        assert!(matches!(
            order.mark_paid(),
            Err(OrderingError::PaymentRefRequired)
        ));

        step(&mut order, |o| o.assign_payment_ref(PaymentRef::generate()));
        step(&mut order, OnlineOrder::mark_paid);
        assert!(order.is_paid());

        assert!(matches!(
            order.mark_paid(),
            Err(OrderingError::InvalidStateTransition {
                current_state: OnlineOrderState::Paid,
                ..
            })
        ));
    }

    #[test]
    fn replay_matches_in_memory_order() {
        let mut order = new_order();
        let history = vec![
            order.added(),
            step(&mut order, |o| o.add_pizza(Pizza::of(PizzaSize::Medium))),
            step(&mut order, OnlineOrder::submit),
            step(&mut order, |o| o.assign_payment_ref(PaymentRef::generate())),
        ];

        assert_eq!(OnlineOrder::replay(&history), Some(order));
    }
}
