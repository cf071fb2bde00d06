use domain::DomainEvent;
use serde::{Deserialize, Serialize};

use super::{Pizza, PizzaRef};

/// Events published on the `pizzas` topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PizzaEvent {
    PizzaAdded { pizza: Pizza },
    PizzaPrepStarted { reference: PizzaRef },
    PizzaPrepFinished { reference: PizzaRef },
    PizzaBakeStarted { reference: PizzaRef },
    PizzaBakeFinished { reference: PizzaRef },
}

impl DomainEvent for PizzaEvent {
    type Ref = PizzaRef;

    fn event_type(&self) -> &'static str {
        match self {
            PizzaEvent::PizzaAdded { .. } => "PizzaAdded",
            PizzaEvent::PizzaPrepStarted { .. } => "PizzaPrepStarted",
            PizzaEvent::PizzaPrepFinished { .. } => "PizzaPrepFinished",
            PizzaEvent::PizzaBakeStarted { .. } => "PizzaBakeStarted",
            PizzaEvent::PizzaBakeFinished { .. } => "PizzaBakeFinished",
        }
    }

    fn reference(&self) -> &PizzaRef {
        match self {
            PizzaEvent::PizzaAdded { pizza } => pizza.reference(),
            PizzaEvent::PizzaPrepStarted { reference }
            | PizzaEvent::PizzaPrepFinished { reference }
            | PizzaEvent::PizzaBakeStarted { reference }
            | PizzaEvent::PizzaBakeFinished { reference } => reference,
        }
    }
}
