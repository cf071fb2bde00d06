//! Pizza shop composition root.
//!
//! Builds one in-process event log, a repository per aggregate type and a
//! service per bounded context, then connects the contexts through the ACL
//! adapters in [`adapters`]. The resulting choreography:
//!
//! ```text
//! ordering ──PaymentRefAssigned──► payments ──PaymentSuccessful──► ordering
//!     └──OnlineOrderPaid──► kitchen ──KitchenOrderAssemblyFinished──► delivery
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod shop;
pub mod telemetry;

pub use config::{Config, ConfigError, PaymentProcessorMode, RepositoryStrategy};
pub use error::ShopError;
pub use shop::PizzaShop;
pub use telemetry::init_tracing;
