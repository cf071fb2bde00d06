use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{EventEnvelope, EventHandler, EventLog, EventLogError, Result, Topic};

type Subscribers = HashMap<Topic, Vec<Arc<dyn EventHandler>>>;

/// In-process event log.
///
/// Dispatch happens inside `publish`: no queue, no background task and no
/// redelivery. Clones share the same subscribers and history, so one instance
/// can be handed to every context.
#[derive(Clone)]
pub struct InProcessEventLog {
    subscribers: Arc<RwLock<Subscribers>>,
    events: Arc<RwLock<HashMap<Topic, Vec<EventEnvelope>>>>,
    retain: bool,
}

impl InProcessEventLog {
    /// Creates a log that keeps every published event per topic.
    pub fn new() -> Self {
        Self::with_retention(true)
    }

    /// Creates a pure bus: events are dispatched but not kept.
    pub fn without_log() -> Self {
        Self::with_retention(false)
    }

    fn with_retention(retain: bool) -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            events: Arc::new(RwLock::new(HashMap::new())),
            retain,
        }
    }

    /// Returns true when published events are kept.
    pub fn retains_events(&self) -> bool {
        self.retain
    }

    /// Removes every subscription on every topic.
    ///
    /// Services hold the log and the log holds the services, so this is also
    /// how a composed application releases its handlers.
    pub async fn purge_subscribers(&self) {
        self.subscribers.write().await.clear();
    }

    /// Returns the total number of events kept across all topics.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.values().map(Vec::len).sum()
    }
}

impl Default for InProcessEventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventLog for InProcessEventLog {
    #[tracing::instrument(
        skip(self, topic, event),
        fields(topic = %topic, event_type = %event.event_type, aggregate_ref = %event.aggregate_ref)
    )]
    async fn publish(&self, topic: &Topic, event: EventEnvelope) -> Result<()> {
        if self.retain {
            self.events
                .write()
                .await
                .entry(topic.clone())
                .or_default()
                .push(event.clone());
        }

        // Snapshot the handler list so handlers can publish or subscribe re-entrantly.
        let handlers = self
            .subscribers
            .read()
            .await
            .get(topic)
            .cloned()
            .unwrap_or_default();

        metrics::counter!("event_log_events_published_total", "topic" => topic.name().to_string())
            .increment(1);
        tracing::debug!(handlers = handlers.len(), "dispatching event");

        for handler in handlers {
            if let Err(source) = handler.handle(topic, &event).await {
                metrics::counter!(
                    "event_log_handler_failures_total",
                    "topic" => topic.name().to_string()
                )
                .increment(1);
                tracing::warn!(error = %source, "event handler failed, dispatch aborted");
                return Err(EventLogError::Handler {
                    topic: topic.clone(),
                    event_type: event.event_type.clone(),
                    source,
                });
            }
        }

        Ok(())
    }

    async fn subscribe(&self, topic: &Topic, handler: Arc<dyn EventHandler>) {
        self.subscribers
            .write()
            .await
            .entry(topic.clone())
            .or_default()
            .push(handler);
        tracing::debug!(topic = %topic, "handler subscribed");
    }

    async fn events_by(&self, topic: &Topic) -> Vec<EventEnvelope> {
        self.events
            .read()
            .await
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    async fn number_of_subscribers(&self, topic: &Topic) -> usize {
        self.subscribers
            .read()
            .await
            .get(topic)
            .map_or(0, Vec::len)
    }
}
