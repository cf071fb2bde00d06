//! Kitchen bounded context.
//!
//! When Ordering reports an order paid, the kitchen creates a `KitchenOrder`
//! and one `Pizza` per line item. Cooks drive the pizzas through prep and the
//! oven; the kitchen order follows along:
//!
//! - every pizza `PREPPED` moves the order to `BAKING` and puts the pizzas in
//!   the oven
//! - every pizza `BAKED` moves the order to `ASSEMBLING`
//!
//! Kitchen order events go on [`KITCHEN_ORDERS_TOPIC`], pizza events on
//! [`PIZZAS_TOPIC`].

pub mod acl;
mod error;
mod kitchen_order;
mod pizza;
mod repository;
mod service;

use event_log::Topic;

pub use error::{KitchenError, Result};
pub use kitchen_order::{KitchenOrder, KitchenOrderEvent, KitchenOrderRef, KitchenOrderState};
pub use pizza::{Pizza, PizzaEvent, PizzaRef, PizzaSize, PizzaState};
pub use repository::{KitchenOrderRepository, PizzaRepository};
pub use service::KitchenService;

/// Topic carrying [`KitchenOrderEvent`]s.
pub const KITCHEN_ORDERS_TOPIC: Topic = Topic::from_static("kitchen_orders");

/// Topic carrying [`PizzaEvent`]s.
pub const PIZZAS_TOPIC: Topic = Topic::from_static("pizzas");
