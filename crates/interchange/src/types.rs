//! Typed structs representing workflow history as served by the
//! orchestration engine.
//!
//! Events and payloads are immutable once parsed. Decoding never touches a
//! [`Payload`] in place: it produces a [`DecodedValue`] next to it, keeping
//! the source envelope available as [`DecodedValue::Raw`].

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Event attributes in the order the API delivered them.
pub type Attributes = IndexMap<String, AttributeValue>;

// ── Payload ─────────────────────────────────────────────────────────

/// Opaque metadata + data envelope attached to an event attribute.
///
/// Metadata values and `data` are base64 strings exactly as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    pub metadata: IndexMap<String, String>,
    pub data: Option<String>,
}

impl Payload {
    /// Look up a raw (still base64-encoded) metadata value.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    /// Recognize a payload envelope in raw JSON.
    ///
    /// An object is a payload when it has exactly a `metadata` object of
    /// string values and a `data` key holding a string or null.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        if obj.len() != 2 {
            return None;
        }

        let metadata = obj
            .get("metadata")?
            .as_object()?
            .iter()
            .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect::<Option<IndexMap<_, _>>>()?;

        let data = match obj.get("data")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            _ => return None,
        };

        Some(Payload { metadata, data })
    }

    pub fn to_json(&self) -> serde_json::Value {
        let metadata = self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::json!({
            "metadata": metadata,
            "data": self.data,
        })
    }
}

// ── DecodedValue ────────────────────────────────────────────────────

/// Result of attempting to decode a payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Plaintext string carried by the payload.
    Text(String),
    /// Any other JSON value carried by the payload.
    Json(serde_json::Value),
    /// Decoding was not attempted or not possible; the source payload.
    Raw(Payload),
}

impl DecodedValue {
    pub fn is_raw(&self) -> bool {
        matches!(self, DecodedValue::Raw(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Wrap an already-parsed JSON value, keeping strings as `Text`.
    pub fn from_json_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => DecodedValue::Text(s),
            other => DecodedValue::Json(other),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DecodedValue::Text(s) => serde_json::Value::String(s.clone()),
            DecodedValue::Json(v) => v.clone(),
            DecodedValue::Raw(p) => p.to_json(),
        }
    }
}

// ── AttributeValue ──────────────────────────────────────────────────

/// A single event attribute, classified at construction time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// JSON null, bool, number, or string.
    Scalar(serde_json::Value),
    /// A payload envelope, raw or decoded.
    Payload(DecodedValue),
    /// A nested attribute map.
    Nested(Attributes),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Classify a raw JSON value into an attribute tree.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(obj) => match Payload::from_json(value) {
                Some(payload) => AttributeValue::Payload(DecodedValue::Raw(payload)),
                None => AttributeValue::Nested(
                    obj.iter()
                        .map(|(k, v)| (k.clone(), AttributeValue::from_json(v)))
                        .collect(),
                ),
            },
            serde_json::Value::Array(items) => {
                AttributeValue::List(items.iter().map(AttributeValue::from_json).collect())
            }
            scalar => AttributeValue::Scalar(scalar.clone()),
        }
    }

    pub fn text(s: impl Into<String>) -> Self {
        AttributeValue::Scalar(serde_json::Value::String(s.into()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttributeValue::Scalar(v) => v.clone(),
            AttributeValue::Payload(decoded) => decoded.to_json(),
            AttributeValue::Nested(attrs) => attributes_to_json(attrs),
            AttributeValue::List(items) => {
                serde_json::Value::Array(items.iter().map(AttributeValue::to_json).collect())
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Scalar(serde_json::Value::String(s)) => Some(s),
            AttributeValue::Payload(DecodedValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Read an integer, accepting the engine's int64-as-string encoding.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Scalar(serde_json::Value::Number(n)) => n.as_i64(),
            AttributeValue::Scalar(serde_json::Value::String(s)) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Attributes> {
        match self {
            AttributeValue::Nested(attrs) => Some(attrs),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Scalar(serde_json::Value::Null))
    }
}

/// Serialize an attribute map back into a JSON object, preserving order.
pub fn attributes_to_json(attrs: &Attributes) -> serde_json::Value {
    serde_json::Value::Object(
        attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

// ── WorkflowEvent ───────────────────────────────────────────────────

/// One immutable record in a workflow's execution history.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowEvent {
    /// Monotonic event id; ordering key.
    pub id: i64,
    pub event_time: OffsetDateTime,
    /// PascalCase type tag, e.g. `ActivityTaskScheduled`.
    pub event_type: String,
    pub attributes: Attributes,
}

impl WorkflowEvent {
    pub fn new(id: i64, event_time: OffsetDateTime, event_type: impl Into<String>) -> Self {
        WorkflowEvent {
            id,
            event_time,
            event_type: event_type.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Serialize into the JSON shape used by the json view.
    ///
    /// Falls back to the unix timestamp if the event time cannot be
    /// rendered as RFC 3339 (years outside 0000..=9999).
    pub fn to_json(&self) -> serde_json::Value {
        let event_time = self
            .event_time
            .format(&Rfc3339)
            .map(serde_json::Value::String)
            .unwrap_or_else(|_| serde_json::Value::from(self.event_time.unix_timestamp()));
        serde_json::json!({
            "id": self.id.to_string(),
            "eventTime": event_time,
            "eventType": self.event_type,
            "attributes": attributes_to_json(&self.attributes),
        })
    }
}

impl Serialize for WorkflowEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let event_time = self
            .event_time
            .format(&Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        let mut state = serializer.serialize_struct("WorkflowEvent", 4)?;
        // int64 ids travel as strings, like the API
        state.serialize_field("id", &self.id.to_string())?;
        state.serialize_field("eventTime", &event_time)?;
        state.serialize_field("eventType", &self.event_type)?;
        state.serialize_field("attributes", &self.attributes)?;
        state.end()
    }
}

// ── HistoryPage ─────────────────────────────────────────────────────

/// One page of events as fetched from the history API.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage {
    /// Events in the order the page delivered them.
    pub events: Vec<WorkflowEvent>,
    /// Continuation token; `None` on the last page.
    pub next_page_token: Option<String>,
}

impl HistoryPage {
    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "history": {
                "events": self.events.iter().map(WorkflowEvent::to_json).collect::<Vec<_>>(),
            },
            "nextPageToken": self.next_page_token.clone().unwrap_or_default(),
        })
    }
}
