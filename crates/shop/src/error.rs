use delivery::DeliveryError;
use event_log::EventLogError;
use kitchen::KitchenError;
use ordering::OrderingError;
use payments::PaymentsError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the shop.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    Payments(#[from] PaymentsError),

    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("Event log error: {0}")]
    EventLog(#[from] EventLogError),
}
