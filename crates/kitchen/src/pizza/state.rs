use serde::{Deserialize, Serialize};

/// The state of a pizza in the kitchen.
///
/// ```text
/// New ──► Prepping ──► Prepped ──► Baking ──► Baked
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaState {
    #[default]
    New,
    Prepping,
    Prepped,
    Baking,
    Baked,
}

impl PizzaState {
    pub fn can_start_prep(&self) -> bool {
        matches!(self, PizzaState::New)
    }

    pub fn can_finish_prep(&self) -> bool {
        matches!(self, PizzaState::Prepping)
    }

    pub fn can_start_bake(&self) -> bool {
        matches!(self, PizzaState::Prepped)
    }

    pub fn can_finish_bake(&self) -> bool {
        matches!(self, PizzaState::Baking)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PizzaState::New => "NEW",
            PizzaState::Prepping => "PREPPING",
            PizzaState::Prepped => "PREPPED",
            PizzaState::Baking => "BAKING",
            PizzaState::Baked => "BAKED",
        }
    }
}

impl std::fmt::Display for PizzaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
