//! Repository contract shared by every aggregate type.

use async_trait::async_trait;
use common::Ref;

use crate::Result;
use crate::aggregate::Aggregate;

/// Per-aggregate-type store.
///
/// `add` persists a new aggregate and publishes its creation event exactly
/// once. Lookups return `Ok(None)` when nothing matches.
#[async_trait]
pub trait Repository<A: Aggregate>: Send + Sync {
    /// Allocates a fresh, never used reference.
    fn next_identity(&self) -> A::Ref {
        <A::Ref as Ref>::generate()
    }

    /// Persists a new aggregate and publishes its creation event.
    async fn add(&self, aggregate: &A) -> Result<()>;

    /// Loads the current state of the aggregate with `reference`.
    async fn find_by_ref(&self, reference: &A::Ref) -> Result<Option<A>>;

    /// Loads every stored aggregate, in the order they were added.
    async fn find_all(&self) -> Result<Vec<A>>;
}

/// Extension trait providing query helpers for repositories.
#[async_trait]
pub trait RepositoryExt<A: Aggregate>: Repository<A> {
    /// Returns every aggregate matching `predicate`, in the order they were added.
    async fn find_where<P>(&self, predicate: P) -> Result<Vec<A>>
    where
        P: Fn(&A) -> bool + Send,
    {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|aggregate| predicate(aggregate))
            .collect())
    }

    /// Returns the first aggregate matching `predicate`.
    async fn find_first<P>(&self, predicate: P) -> Result<Option<A>>
    where
        P: Fn(&A) -> bool + Send,
    {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|aggregate| predicate(aggregate)))
    }
}

// Blanket implementation for all Repository implementations
impl<A: Aggregate, T: Repository<A> + ?Sized> RepositoryExt<A> for T {}
