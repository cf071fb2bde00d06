//! Aggregates, their events and the fold that rebuilds one from the other.

use std::fmt::Debug;

use common::Ref;
use serde::{Serialize, de::DeserializeOwned};

/// A past-tense fact about one aggregate, carrying that aggregate's reference.
pub trait DomainEvent: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Reference type of the aggregate this event concerns.
    type Ref: Ref;

    /// Same string as the `type` tag of the serialized payload.
    fn event_type(&self) -> &'static str;

    fn reference(&self) -> &Self::Ref;
}

/// Trait for aggregates whose state moves forward through published events.
///
/// Aggregates:
/// - Are created in memory, then persisted once through a repository's `add`,
///   which publishes the event returned by [`Aggregate::added`]
/// - Decide transitions in command methods that return an event or an error
/// - Fold published events back into state with [`Aggregate::apply`]
///
/// Folding `from_added` followed by `apply` over every later event must give
/// an aggregate equal to the one the transitions produced in memory.
pub trait Aggregate:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Reference type identifying instances of this aggregate.
    type Ref: Ref;

    type Event: DomainEvent<Ref = Self::Ref>;

    /// Stable name stored with every envelope and row.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's reference.
    fn reference(&self) -> &Self::Ref;

    /// Returns the creation event carrying a snapshot of this aggregate.
    fn added(&self) -> Self::Event;

    /// Rebuilds an aggregate from its creation event.
    ///
    /// Returns None for any other kind of event.
    fn from_added(event: &Self::Event) -> Option<Self>;

    /// Pure state update. The creation event is a no-op here; it is consumed
    /// by [`Aggregate::from_added`].
    fn apply(&mut self, event: &Self::Event);

    fn apply_events<'a>(&mut self, events: impl IntoIterator<Item = &'a Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Folds a history into an aggregate.
    ///
    /// The first event must be the creation event; otherwise None is returned.
    fn replay<'a>(events: impl IntoIterator<Item = &'a Self::Event>) -> Option<Self> {
        let mut events = events.into_iter();
        let mut aggregate = Self::from_added(events.next()?)?;
        aggregate.apply_events(events);
        Some(aggregate)
    }
}
