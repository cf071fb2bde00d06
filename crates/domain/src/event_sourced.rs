//! Repository that rebuilds aggregates by folding their topic history.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::Ref;
use event_log::{EventEnvelope, EventLog, EventLogExt, Topic};
use tokio::sync::RwLock;

use crate::aggregate::{Aggregate, DomainEvent};
use crate::publisher::TopicPublisher;
use crate::repository::Repository;
use crate::{RepositoryError, Result};

/// Repository whose only storage is the event log.
///
/// The creation event carries the initial snapshot; `find_by_ref` folds every
/// later event for the same reference on top of it. Requires a log that
/// retains events.
///
/// A creation event whose dispatch failed is remembered; adding the same
/// aggregate again dispatches it once more, so that history may hold the
/// creation event twice. Folding ignores the repeat.
#[derive(Clone)]
pub struct EventSourcedRepository<A: Aggregate> {
    publisher: TopicPublisher,
    unpublished: Arc<RwLock<HashSet<String>>>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A: Aggregate> EventSourcedRepository<A> {
    pub fn new(log: Arc<dyn EventLog>, topic: Topic) -> Self {
        Self {
            publisher: TopicPublisher::new(log, topic),
            unpublished: Arc::new(RwLock::new(HashSet::new())),
            _aggregate: PhantomData,
        }
    }

    fn fold(reference: &str, envelopes: &[EventEnvelope]) -> Result<Option<A>> {
        let events = envelopes
            .iter()
            .map(EventEnvelope::decode::<A::Event>)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let Some(first) = events.first() else {
            return Ok(None);
        };
        let Some(mut aggregate) = A::from_added(first) else {
            return Err(RepositoryError::CorruptHistory {
                aggregate_type: A::aggregate_type(),
                reference: reference.to_string(),
                reason: format!("history starts with {}", first.event_type()),
            });
        };
        aggregate.apply_events(&events[1..]);
        Ok(Some(aggregate))
    }
}

#[async_trait]
impl<A: Aggregate> Repository<A> for EventSourcedRepository<A> {
    async fn add(&self, aggregate: &A) -> Result<()> {
        let reference = aggregate.reference().as_str();
        let history = self
            .publisher
            .log()
            .events_for(self.publisher.topic(), reference)
            .await;
        if !history.is_empty() {
            let retry = self.unpublished.read().await.contains(reference)
                && Self::fold(reference, &history)?.as_ref() == Some(aggregate);
            if !retry {
                return Err(RepositoryError::AlreadyExists {
                    aggregate_type: A::aggregate_type(),
                    reference: reference.to_string(),
                });
            }
            tracing::info!(
                aggregate_type = A::aggregate_type(),
                aggregate_ref = reference,
                "republishing creation event"
            );
        }

        let published = self.publisher.publish::<A>(&aggregate.added()).await;
        {
            let mut unpublished = self.unpublished.write().await;
            if published.is_err() {
                unpublished.insert(reference.to_string());
            } else {
                unpublished.remove(reference);
            }
        }
        published?;

        metrics::counter!("repository_aggregates_added_total", "aggregate_type" => A::aggregate_type())
            .increment(1);
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            aggregate_ref = reference,
            "aggregate added"
        );
        Ok(())
    }

    async fn find_by_ref(&self, reference: &A::Ref) -> Result<Option<A>> {
        let history = self
            .publisher
            .log()
            .events_for(self.publisher.topic(), reference.as_str())
            .await;
        Self::fold(reference.as_str(), &history)
    }

    async fn find_all(&self) -> Result<Vec<A>> {
        let envelopes = self.publisher.log().events_by(self.publisher.topic()).await;

        let mut references: Vec<&str> = Vec::new();
        for envelope in &envelopes {
            if !references.contains(&envelope.aggregate_ref.as_str()) {
                references.push(&envelope.aggregate_ref);
            }
        }

        let mut aggregates = Vec::with_capacity(references.len());
        for reference in references {
            let history: Vec<EventEnvelope> = envelopes
                .iter()
                .filter(|envelope| envelope.aggregate_ref == reference)
                .cloned()
                .collect();
            if let Some(aggregate) = Self::fold(reference, &history)? {
                aggregates.push(aggregate);
            }
        }
        Ok(aggregates)
    }
}
