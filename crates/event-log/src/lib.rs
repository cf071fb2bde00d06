//! Event log for choreographed bounded contexts.
//!
//! This crate provides:
//! - `Topic` named channels
//! - `EventEnvelope` carrying a JSON payload tagged with its aggregate reference
//! - `EventHandler` and `EventLog` traits
//! - `InProcessEventLog`, a synchronous-dispatch bus that optionally keeps every
//!   published envelope per topic

pub mod error;
pub mod event;
pub mod handler;
pub mod log;
pub mod memory;
pub mod topic;

pub use error::{EventLogError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId};
pub use handler::{EventHandler, FnHandler, HandlerError, handler_fn};
pub use log::{EventLog, EventLogExt};
pub use memory::InProcessEventLog;
pub use topic::Topic;
