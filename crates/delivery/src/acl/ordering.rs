//! Shadow of the Ordering context.

use async_trait::async_trait;
use event_log::HandlerError;

common::define_ref! {
    /// Reference to an online order owned by the Ordering context.
    pub OnlineOrderRef
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnlineOrderType {
    Delivery,
    Pickup,
}

/// The parts of an online order Delivery looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineOrder {
    pub reference: OnlineOrderRef,
    pub order_type: OnlineOrderType,
}

/// What Delivery needs from the Ordering context.
#[async_trait]
pub trait OrderingService: Send + Sync {
    async fn find_by_ref(
        &self,
        reference: &OnlineOrderRef,
    ) -> Result<Option<OnlineOrder>, HandlerError>;
}
