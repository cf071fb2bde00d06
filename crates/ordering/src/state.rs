//! Online order state machine.

use serde::{Deserialize, Serialize};

/// The state of an online order in its lifecycle.
///
/// State transitions:
/// ```text
/// New ──(submit)──► Submitted ──(payment successful)──► Paid
/// ```
///
/// Pizzas can only be added while the order is `New`. The payment reference
/// is assigned while `Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnlineOrderState {
    #[default]
    New,
    Submitted,
    Paid,
}

impl OnlineOrderState {
    /// Returns true if pizzas can be added in this state.
    pub fn can_add_pizza(&self) -> bool {
        matches!(self, OnlineOrderState::New)
    }

    /// Returns true if the order can be submitted in this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, OnlineOrderState::New)
    }

    /// Returns true if a payment reference can be assigned in this state.
    pub fn can_assign_payment_ref(&self) -> bool {
        matches!(self, OnlineOrderState::Submitted)
    }

    /// Returns true if the order can be marked paid in this state.
    pub fn can_mark_paid(&self) -> bool {
        matches!(self, OnlineOrderState::Submitted)
    }

    /// Returns the stable state code, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            OnlineOrderState::New => "NEW",
            OnlineOrderState::Submitted => "SUBMITTED",
            OnlineOrderState::Paid => "PAID",
        }
    }
}

impl std::fmt::Display for OnlineOrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
