//! Aggregate and repository framework shared by the bounded contexts.
//!
//! This crate provides:
//! - `Aggregate` and `DomainEvent` traits with a pure event reducer
//! - `TopicPublisher` for guarded transitions that publish one event each
//! - The `Repository` contract with two strategies:
//!   - `MaterializedViewRepository`: snapshot rows updated from the topic
//!   - `EventSourcedRepository`: aggregates folded from the topic history

pub mod aggregate;
pub mod error;
pub mod event_sourced;
pub mod materialized;
pub mod publisher;
pub mod repository;
pub mod snapshot;

pub use aggregate::{Aggregate, DomainEvent};
pub use error::{RepositoryError, Result};
pub use event_sourced::EventSourcedRepository;
pub use materialized::MaterializedViewRepository;
pub use publisher::{TopicPublisher, envelope_for};
pub use repository::{Repository, RepositoryExt};
pub use snapshot::Snapshot;
