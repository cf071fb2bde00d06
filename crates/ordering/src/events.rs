//! Online order domain events.

use domain::DomainEvent;
use serde::{Deserialize, Serialize};

use crate::acl::payments::PaymentRef;
use crate::{OnlineOrder, OnlineOrderRef, Pizza};

/// Events published on the `ordering` topic.
///
/// Serialized with an internal `type` tag; other contexts read these through
/// their own shadow enums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OnlineOrderEvent {
    /// Order was stored. Carries the order as added.
    OnlineOrderAdded { order: OnlineOrder },

    /// A pizza was added to the order.
    OnlineOrderPizzaAdded {
        reference: OnlineOrderRef,
        pizza: Pizza,
    },

    /// Order was submitted and is awaiting payment.
    OnlineOrderSubmitted { reference: OnlineOrderRef },

    /// A payment was created for the order.
    PaymentRefAssigned {
        reference: OnlineOrderRef,
        payment_ref: PaymentRef,
    },

    /// The order's payment succeeded.
    OnlineOrderPaid { reference: OnlineOrderRef },
}

impl DomainEvent for OnlineOrderEvent {
    type Ref = OnlineOrderRef;

    fn event_type(&self) -> &'static str {
        match self {
            OnlineOrderEvent::OnlineOrderAdded { .. } => "OnlineOrderAdded",
            OnlineOrderEvent::OnlineOrderPizzaAdded { .. } => "OnlineOrderPizzaAdded",
            OnlineOrderEvent::OnlineOrderSubmitted { .. } => "OnlineOrderSubmitted",
            OnlineOrderEvent::PaymentRefAssigned { .. } => "PaymentRefAssigned",
            OnlineOrderEvent::OnlineOrderPaid { .. } => "OnlineOrderPaid",
        }
    }

    fn reference(&self) -> &OnlineOrderRef {
        match self {
            OnlineOrderEvent::OnlineOrderAdded { order } => order.reference(),
            OnlineOrderEvent::OnlineOrderPizzaAdded { reference, .. }
            | OnlineOrderEvent::OnlineOrderSubmitted { reference }
            | OnlineOrderEvent::PaymentRefAssigned { reference, .. }
            | OnlineOrderEvent::OnlineOrderPaid { reference } => reference,
        }
    }
}
