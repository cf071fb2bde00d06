use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::Ref;

use crate::aggregate::Aggregate;

/// A stored row holding the current state of one aggregate.
///
/// The state is the aggregate's JSON form, so enum states are kept as their
/// serialized codes (e.g. `"PREPPING"`) and child collections keep their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Reference string the row is keyed by.
    pub reference: String,

    pub aggregate_type: String,

    /// When the row was last written.
    pub updated_at: DateTime<Utc>,

    pub state: serde_json::Value,
}

impl Snapshot {
    /// Creates a row from an aggregate.
    pub fn from_aggregate<A: Aggregate>(aggregate: &A) -> Result<Self, serde_json::Error> {
        Ok(Self {
            reference: aggregate.reference().as_str().to_string(),
            aggregate_type: A::aggregate_type().to_string(),
            updated_at: Utc::now(),
            state: serde_json::to_value(aggregate)?,
        })
    }

    /// Deserializes the row into its aggregate.
    pub fn to_aggregate<A: Aggregate>(&self) -> Result<A, serde_json::Error> {
        A::deserialize(&self.state)
    }

    /// Gets a reference to the state as JSON.
    pub fn state_ref(&self) -> &serde_json::Value {
        &self.state
    }
}
