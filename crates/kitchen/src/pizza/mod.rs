//! Pizza aggregate: one pizza being made for a kitchen order.

mod aggregate;
mod events;
mod state;

pub use aggregate::{Pizza, PizzaRef, PizzaSize};
pub use events::PizzaEvent;
pub use state::PizzaState;
