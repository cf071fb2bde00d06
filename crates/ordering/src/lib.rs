//! Ordering bounded context.
//!
//! Customers build an `OnlineOrder` of pizzas, submit it and pay for it.
//! Payment happens in the Payments context: this context asks for a payment
//! through [`acl::payments::PaymentService`] and marks the order paid when
//! `PaymentSuccessful` shows up on the `payments` topic.
//!
//! Every order event is published on [`ORDERING_TOPIC`].

pub mod acl;
mod aggregate;
mod error;
mod events;
mod repository;
mod service;
mod state;
mod value_objects;

use event_log::Topic;

pub use aggregate::OnlineOrder;
pub use error::{OrderingError, Result};
pub use events::OnlineOrderEvent;
pub use repository::OnlineOrderRepository;
pub use service::OrderingService;
pub use state::OnlineOrderState;
pub use value_objects::{OnlineOrderRef, OnlineOrderType, Pizza, PizzaSize};

/// Topic carrying [`OnlineOrderEvent`]s.
pub const ORDERING_TOPIC: Topic = Topic::from_static("ordering");
