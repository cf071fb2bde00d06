//! Delivery bounded context.
//!
//! Once the kitchen finishes assembling an order, Delivery looks the order up
//! in Kitchen and Ordering and records a `DeliveryOrder` holding both
//! references and a copy of the pizza list.

pub mod acl;
mod aggregate;
mod error;
mod repository;
mod service;

use event_log::Topic;

pub use aggregate::{
    DeliveryOrder, DeliveryOrderEvent, DeliveryOrderRef, DeliveryOrderState, Pizza, PizzaSize,
};
pub use error::{DeliveryError, Result};
pub use repository::DeliveryOrderRepository;
pub use service::DeliveryService;

/// Topic carrying [`DeliveryOrderEvent`]s.
pub const DELIVERY_ORDERS_TOPIC: Topic = Topic::from_static("delivery_orders");
