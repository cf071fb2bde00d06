use async_trait::async_trait;

use crate::{EventEnvelope, Topic};

/// Error type returned by handlers. Any error can be boxed into it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A subscriber to one or more topics.
///
/// Handlers run inside the publisher's call and may themselves publish.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles an event published on `topic`.
    async fn handle(&self, topic: &Topic, event: &EventEnvelope) -> Result<(), HandlerError>;
}

/// Adapts a synchronous closure into an [`EventHandler`].
pub struct FnHandler<F>(F);

/// Wraps `f` as an event handler.
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(&Topic, &EventEnvelope) -> Result<(), HandlerError> + Send + Sync,
{
    FnHandler(f)
}

#[async_trait]
impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&Topic, &EventEnvelope) -> Result<(), HandlerError> + Send + Sync,
{
    async fn handle(&self, topic: &Topic, event: &EventEnvelope) -> Result<(), HandlerError> {
        (self.0)(topic, event)
    }
}
