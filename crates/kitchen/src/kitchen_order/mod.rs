//! Kitchen order aggregate and related types.

mod aggregate;
mod events;
mod state;

pub use aggregate::{KitchenOrder, KitchenOrderRef};
pub use events::KitchenOrderEvent;
pub use state::KitchenOrderState;
