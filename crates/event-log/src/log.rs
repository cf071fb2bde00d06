use std::sync::Arc;

use async_trait::async_trait;

use crate::{EventEnvelope, EventHandler, Result, Topic};

/// Core trait for event log implementations.
///
/// An event log routes published events to the handlers subscribed to a topic
/// and may also keep an append-only history per topic.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Publishes an event on `topic`.
    ///
    /// The event is appended to the topic history (if kept) before any handler
    /// runs. Handlers are then awaited one at a time in subscription order.
    /// The first handler error stops dispatch and is returned.
    async fn publish(&self, topic: &Topic, event: EventEnvelope) -> Result<()>;

    /// Subscribes `handler` to `topic`. Only later publishes reach it.
    async fn subscribe(&self, topic: &Topic, handler: Arc<dyn EventHandler>);

    /// Returns every event published on `topic`, oldest first.
    ///
    /// Empty when nothing was published or when history is not kept.
    async fn events_by(&self, topic: &Topic) -> Vec<EventEnvelope>;

    /// Returns how many handlers are subscribed to `topic`.
    async fn number_of_subscribers(&self, topic: &Topic) -> usize;
}

/// Extension trait providing convenience methods for event logs.
#[async_trait]
pub trait EventLogExt: EventLog {
    /// Subscribes the same handler to several topics.
    async fn subscribe_all(&self, topics: &[Topic], handler: Arc<dyn EventHandler>) {
        for topic in topics {
            self.subscribe(topic, handler.clone()).await;
        }
    }

    /// Returns the events on `topic` that concern `aggregate_ref`, oldest first.
    async fn events_for(&self, topic: &Topic, aggregate_ref: &str) -> Vec<EventEnvelope> {
        self.events_by(topic)
            .await
            .into_iter()
            .filter(|event| event.aggregate_ref == aggregate_ref)
            .collect()
    }
}

// Blanket implementation for all EventLog implementations
impl<T: EventLog + ?Sized> EventLogExt for T {}
