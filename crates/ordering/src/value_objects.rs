//! Value objects for the ordering context.

use common::Amount;
use serde::{Deserialize, Serialize};

common::define_ref! {
    /// Reference to an [`OnlineOrder`](crate::OnlineOrder).
    pub OnlineOrderRef
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlineOrderType {
    Delivery,
    Pickup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaSize {
    Small,
    Medium,
    Large,
}

impl PizzaSize {
    /// Menu price for this size.
    pub fn price(&self) -> Amount {
        match self {
            PizzaSize::Small => Amount::of(8, 0),
            PizzaSize::Medium => Amount::of(10, 0),
            PizzaSize::Large => Amount::of(12, 0),
        }
    }
}

/// A pizza line item on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pizza {
    pub size: PizzaSize,
}

impl Pizza {
    pub fn of(size: PizzaSize) -> Self {
        Self { size }
    }

    pub fn price(&self) -> Amount {
        self.size.price()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_follow_the_menu() {
        assert_eq!(Pizza::of(PizzaSize::Small).price(), Amount::of(8, 0));
        assert_eq!(Pizza::of(PizzaSize::Medium).price(), Amount::of(10, 0));
        assert_eq!(Pizza::of(PizzaSize::Large).price(), Amount::of(12, 0));
    }

    #[test]
    fn enums_serialize_as_stable_codes() {
        assert_eq!(
            serde_json::to_string(&OnlineOrderType::Pickup).unwrap(),
            "\"PICKUP\""
        );
        assert_eq!(
            serde_json::to_value(Pizza::of(PizzaSize::Medium)).unwrap(),
            serde_json::json!({"size": "MEDIUM"})
        );
    }
}
