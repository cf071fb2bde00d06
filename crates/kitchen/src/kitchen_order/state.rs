use serde::{Deserialize, Serialize};

/// The state of a kitchen order.
///
/// ```text
/// New ──► Prepping ──► Baking ──► Assembling ──► Assembled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenOrderState {
    #[default]
    New,
    Prepping,
    Baking,
    Assembling,
    Assembled,
}

impl KitchenOrderState {
    pub fn can_start_prep(&self) -> bool {
        matches!(self, KitchenOrderState::New)
    }

    pub fn can_start_bake(&self) -> bool {
        matches!(self, KitchenOrderState::Prepping)
    }

    pub fn can_start_assembly(&self) -> bool {
        matches!(self, KitchenOrderState::Baking)
    }

    pub fn can_finish_assembly(&self) -> bool {
        matches!(self, KitchenOrderState::Assembling)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KitchenOrderState::New => "NEW",
            KitchenOrderState::Prepping => "PREPPING",
            KitchenOrderState::Baking => "BAKING",
            KitchenOrderState::Assembling => "ASSEMBLING",
            KitchenOrderState::Assembled => "ASSEMBLED",
        }
    }
}

impl std::fmt::Display for KitchenOrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
