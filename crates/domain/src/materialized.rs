//! Snapshot-row repository kept current by its own topic subscription.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use common::Ref;
use event_log::{EventEnvelope, EventHandler, EventLog, HandlerError, Topic};
use tokio::sync::RwLock;

use crate::aggregate::{Aggregate, DomainEvent};
use crate::publisher::TopicPublisher;
use crate::repository::Repository;
use crate::snapshot::Snapshot;
use crate::{RepositoryError, Result};

#[derive(Default)]
struct Rows {
    insertion_order: Vec<String>,
    by_ref: HashMap<String, Snapshot>,
    /// Rows whose creation event did not reach every subscriber.
    unpublished: HashSet<String>,
}

impl Rows {
    fn insert(&mut self, row: Snapshot) {
        self.insertion_order.push(row.reference.clone());
        self.by_ref.insert(row.reference.clone(), row);
    }
}

/// Repository storing one snapshot row per aggregate.
///
/// `add` writes the row and publishes the creation event. Every later event
/// on the topic is applied to the matching row in place, so the repository
/// must be subscribed before any service that reads it from a handler on
/// the same topic.
///
/// When that publish fails the row is kept and marked unpublished. Adding the
/// same aggregate again publishes the creation event once more instead of
/// failing with [`RepositoryError::AlreadyExists`].
#[derive(Clone)]
pub struct MaterializedViewRepository<A: Aggregate> {
    rows: Arc<RwLock<Rows>>,
    publisher: TopicPublisher,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A: Aggregate> MaterializedViewRepository<A> {
    /// Creates the repository and subscribes it to `topic`.
    pub async fn new(log: Arc<dyn EventLog>, topic: Topic) -> Self {
        let repository = Self {
            rows: Arc::new(RwLock::new(Rows::default())),
            publisher: TopicPublisher::new(log.clone(), topic.clone()),
            _aggregate: PhantomData,
        };
        log.subscribe(&topic, Arc::new(repository.clone())).await;
        repository
    }

    /// Returns the stored row for `reference`.
    pub async fn row(&self, reference: &A::Ref) -> Option<Snapshot> {
        self.rows.read().await.by_ref.get(reference.as_str()).cloned()
    }

    async fn update(&self, event: &A::Event) -> Result<()> {
        let key = event.reference().as_str();
        let mut rows = self.rows.write().await;

        if let Some(added) = A::from_added(event) {
            if !rows.by_ref.contains_key(key) {
                rows.insert(Snapshot::from_aggregate(&added)?);
            }
            return Ok(());
        }

        let Some(row) = rows.by_ref.get_mut(key) else {
            tracing::warn!(
                aggregate_type = A::aggregate_type(),
                aggregate_ref = key,
                event_type = event.event_type(),
                "event for unknown aggregate ignored"
            );
            return Ok(());
        };

        let mut aggregate: A = row.to_aggregate()?;
        aggregate.apply(event);
        *row = Snapshot::from_aggregate(&aggregate)?;
        Ok(())
    }
}

#[async_trait]
impl<A: Aggregate> Repository<A> for MaterializedViewRepository<A> {
    async fn add(&self, aggregate: &A) -> Result<()> {
        let row = Snapshot::from_aggregate(aggregate)?;
        let reference = row.reference.clone();
        {
            let mut rows = self.rows.write().await;
            let unchanged = rows.by_ref.get(&reference).map(|stored| stored.state == row.state);
            match unchanged {
                None => rows.insert(row),
                Some(true) if rows.unpublished.contains(&reference) => {
                    tracing::info!(
                        aggregate_type = A::aggregate_type(),
                        aggregate_ref = %reference,
                        "republishing creation event"
                    );
                }
                Some(_) => {
                    return Err(RepositoryError::AlreadyExists {
                        aggregate_type: A::aggregate_type(),
                        reference,
                    });
                }
            }
        }

        let published = self.publisher.publish::<A>(&aggregate.added()).await;
        {
            let mut rows = self.rows.write().await;
            if published.is_err() {
                rows.unpublished.insert(reference);
            } else {
                rows.unpublished.remove(&reference);
            }
        }
        published?;

        metrics::counter!("repository_aggregates_added_total", "aggregate_type" => A::aggregate_type())
            .increment(1);
        tracing::debug!(
            aggregate_type = A::aggregate_type(),
            aggregate_ref = %aggregate.reference(),
            "aggregate added"
        );
        Ok(())
    }

    async fn find_by_ref(&self, reference: &A::Ref) -> Result<Option<A>> {
        let rows = self.rows.read().await;
        match rows.by_ref.get(reference.as_str()) {
            Some(row) => Ok(Some(row.to_aggregate()?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<A>> {
        let rows = self.rows.read().await;
        let mut aggregates = Vec::with_capacity(rows.insertion_order.len());
        for reference in &rows.insertion_order {
            if let Some(row) = rows.by_ref.get(reference) {
                aggregates.push(row.to_aggregate()?);
            }
        }
        Ok(aggregates)
    }
}

#[async_trait]
impl<A: Aggregate> EventHandler for MaterializedViewRepository<A> {
    async fn handle(
        &self,
        _topic: &Topic,
        envelope: &EventEnvelope,
    ) -> std::result::Result<(), HandlerError> {
        let event: A::Event = envelope.decode()?;
        self.update(&event).await?;
        Ok(())
    }
}
