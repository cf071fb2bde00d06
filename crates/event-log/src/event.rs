use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EventLogError, Result};

/// Identifies one published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable published fact together with its routing metadata.
///
/// The payload is the JSON form of a context's event enum. Subscribers decode
/// it into whichever type they understand, which for a foreign context is
/// usually a shadow enum that ignores unknown kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    /// Event kind, matching the payload's `type` tag (e.g. "OnlineOrderSubmitted").
    pub event_type: String,
    pub aggregate_ref: String,
    /// Aggregate kind (e.g. "OnlineOrder", "Pizza").
    pub aggregate_type: String,
    pub published_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    pub fn builder() -> EventEnvelopeBuilder {
        EventEnvelopeBuilder::default()
    }

    /// Deserializes the payload into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.payload)?)
    }
}

/// Collects the routing metadata of an envelope. The id and publication
/// time are assigned by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct EventEnvelopeBuilder {
    event_type: Option<String>,
    aggregate_ref: Option<String>,
    aggregate_type: Option<String>,
    payload: Option<serde_json::Value>,
}

impl EventEnvelopeBuilder {
    pub fn event_type(self, event_type: impl Into<String>) -> Self {
        Self {
            event_type: Some(event_type.into()),
            ..self
        }
    }

    pub fn aggregate_ref(self, reference: impl Into<String>) -> Self {
        Self {
            aggregate_ref: Some(reference.into()),
            ..self
        }
    }

    pub fn aggregate_type(self, aggregate_type: impl Into<String>) -> Self {
        Self {
            aggregate_type: Some(aggregate_type.into()),
            ..self
        }
    }

    /// Serializes `payload` as the envelope body.
    pub fn payload<T: Serialize>(self, payload: &T) -> std::result::Result<Self, serde_json::Error> {
        Ok(self.payload_raw(serde_json::to_value(payload)?))
    }

    pub fn payload_raw(self, payload: serde_json::Value) -> Self {
        Self {
            payload: Some(payload),
            ..self
        }
    }

    /// Fails with the name of the first missing field.
    pub fn build(self) -> Result<EventEnvelope> {
        fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
            value.ok_or(EventLogError::IncompleteEnvelope(field))
        }

        Ok(EventEnvelope {
            event_id: EventId::new(),
            event_type: required(self.event_type, "event_type")?,
            aggregate_ref: required(self.aggregate_ref, "aggregate_ref")?,
            aggregate_type: required(self.aggregate_type, "aggregate_type")?,
            published_at: Utc::now(),
            payload: required(self.payload, "payload")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type")]
    enum Sample {
        Created { id: String },
    }

    #[test]
    fn every_build_gets_a_fresh_id() {
        let build = || {
            EventEnvelope::builder()
                .event_type("Created")
                .aggregate_ref("ABC")
                .aggregate_type("Sample")
                .payload_raw(serde_json::json!({}))
                .build()
                .unwrap()
        };
        assert_ne!(build().event_id, build().event_id);
    }

    #[test]
    fn builder_sets_every_field() {
        let payload = serde_json::json!({"type": "Created", "id": "ABC"});

        let envelope = EventEnvelope::builder()
            .event_type("Created")
            .aggregate_ref("ABC")
            .aggregate_type("Sample")
            .payload_raw(payload.clone())
            .build()
            .unwrap();

        assert_eq!(envelope.event_type, "Created");
        assert_eq!(envelope.aggregate_ref, "ABC");
        assert_eq!(envelope.aggregate_type, "Sample");
        assert_eq!(envelope.payload, payload);
    }

    #[test]
    fn build_reports_the_missing_field() {
        let result = EventEnvelope::builder()
            .event_type("Created")
            .aggregate_type("Sample")
            .payload_raw(serde_json::json!({}))
            .build();

        assert!(matches!(
            result,
            Err(EventLogError::IncompleteEnvelope("aggregate_ref"))
        ));
    }

    #[test]
    fn empty_builder_names_event_type_first() {
        assert!(matches!(
            EventEnvelope::builder().build(),
            Err(EventLogError::IncompleteEnvelope("event_type"))
        ));
    }

    #[test]
    fn decode_reads_typed_payload() {
        let event = Sample::Created { id: "ABC".into() };
        let envelope = EventEnvelope::builder()
            .event_type("Created")
            .aggregate_ref("ABC")
            .aggregate_type("Sample")
            .payload(&event)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(envelope.decode::<Sample>().unwrap(), event);
    }

    #[test]
    fn decode_surfaces_serialization_errors() {
        let envelope = EventEnvelope::builder()
            .event_type("Unknown")
            .aggregate_ref("ABC")
            .aggregate_type("Sample")
            .payload_raw(serde_json::json!({"type": "Unknown"}))
            .build()
            .unwrap();

        assert!(matches!(
            envelope.decode::<Sample>(),
            Err(EventLogError::Serialization(_))
        ));
    }
}
