//! Publishing aggregate events on a topic.

use std::sync::Arc;

use common::Ref;
use event_log::{EventEnvelope, EventLog, EventLogError, Topic};

use crate::aggregate::{Aggregate, DomainEvent};

/// Wraps an aggregate event in an envelope ready for publishing.
pub fn envelope_for<A: Aggregate>(event: &A::Event) -> Result<EventEnvelope, EventLogError> {
    EventEnvelope::builder()
        .event_type(event.event_type())
        .aggregate_ref(event.reference().as_str())
        .aggregate_type(A::aggregate_type())
        .payload(event)?
        .build()
}

/// Publishes the events of one aggregate type on its topic.
#[derive(Clone)]
pub struct TopicPublisher {
    log: Arc<dyn EventLog>,
    topic: Topic,
}

impl TopicPublisher {
    pub fn new(log: Arc<dyn EventLog>, topic: Topic) -> Self {
        Self { log, topic }
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn log(&self) -> &Arc<dyn EventLog> {
        &self.log
    }

    /// Publishes one aggregate event.
    pub async fn publish<A: Aggregate>(&self, event: &A::Event) -> Result<(), EventLogError> {
        let envelope = envelope_for::<A>(event)?;
        self.log.publish(&self.topic, envelope).await
    }

    /// Runs a guarded transition.
    ///
    /// `decide` checks the guard against the current state and returns the
    /// event to record. The event is published and then applied to
    /// `aggregate`. A rejected guard or an event that cannot be encoded leaves
    /// `aggregate` untouched. A failing subscriber does not: the event is
    /// already recorded, so it is applied and the handler error returned.
    pub async fn transition<A, E, F>(&self, aggregate: &mut A, decide: F) -> Result<A::Event, E>
    where
        A: Aggregate,
        F: FnOnce(&A) -> Result<A::Event, E>,
        E: From<EventLogError>,
    {
        let event = decide(&*aggregate)?;

        let mut next = aggregate.clone();
        next.apply(&event);

        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            aggregate_ref = %aggregate.reference(),
            event_type = event.event_type(),
            "transition"
        );
        match self.publish::<A>(&event).await {
            Ok(()) => {
                *aggregate = next;
                Ok(event)
            }
            Err(error @ EventLogError::Handler { .. }) => {
                *aggregate = next;
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }
}
