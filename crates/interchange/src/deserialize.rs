//! Deserialization from history API JSON into typed structs.
//!
//! The main entry point is [`from_history_page`], which takes a
//! `&serde_json::Value` and produces a [`HistoryPage`].

use crate::types::*;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Errors during history JSON deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// The page is missing a required top-level field.
    MissingField { field: String },
    /// An event is missing or has a malformed required field.
    InvalidEvent { id: String, message: String },
    /// The page structure is invalid.
    InvalidPage(String),
}

impl fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterchangeError::MissingField { field } => {
                write!(f, "history page missing required field: '{}'", field)
            }
            InterchangeError::InvalidEvent { id, message } => {
                write!(f, "event '{}': {}", id, message)
            }
            InterchangeError::InvalidPage(msg) => {
                write!(f, "invalid history page: {}", msg)
            }
        }
    }
}

impl std::error::Error for InterchangeError {}

const EVENT_TYPE_PREFIX: &str = "EVENT_TYPE_";
const ATTRIBUTES_SUFFIX: &str = "EventAttributes";

/// Deserialize a history page.
///
/// Accepts both the full API response shape
/// (`{"history": {"events": [...]}, "nextPageToken": "..."}`) and a bare
/// `{"events": [...]}` object. Events keep the order the page delivered.
pub fn from_history_page(page: &serde_json::Value) -> Result<HistoryPage, InterchangeError> {
    if !page.is_object() {
        return Err(InterchangeError::InvalidPage(
            "expected a JSON object".to_string(),
        ));
    }

    let events_arr = page
        .get("history")
        .and_then(|h| h.get("events"))
        .or_else(|| page.get("events"))
        .ok_or_else(|| InterchangeError::MissingField {
            field: "history.events".to_string(),
        })?
        .as_array()
        .ok_or_else(|| InterchangeError::InvalidPage("'events' is not an array".to_string()))?;

    let events = events_arr
        .iter()
        .map(parse_event)
        .collect::<Result<Vec<_>, _>>()?;

    let next_page_token = page
        .get("nextPageToken")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(HistoryPage {
        events,
        next_page_token,
    })
}

/// Deserialize a single raw event object.
pub fn parse_event(obj: &serde_json::Value) -> Result<WorkflowEvent, InterchangeError> {
    let id = parse_event_id(obj)?;

    let event_type = obj
        .get("eventType")
        .and_then(|v| v.as_str())
        .map(normalize_event_type)
        .ok_or_else(|| InterchangeError::InvalidEvent {
            id: id.to_string(),
            message: "missing 'eventType' field".to_string(),
        })?;

    let raw_time = obj
        .get("eventTime")
        .and_then(|v| v.as_str())
        .ok_or_else(|| InterchangeError::InvalidEvent {
            id: id.to_string(),
            message: "missing 'eventTime' field".to_string(),
        })?;
    let event_time =
        OffsetDateTime::parse(raw_time, &Rfc3339).map_err(|e| InterchangeError::InvalidEvent {
            id: id.to_string(),
            message: format!("invalid 'eventTime' '{}': {}", raw_time, e),
        })?;

    Ok(WorkflowEvent {
        id,
        event_time,
        event_type,
        attributes: parse_attributes(obj),
    })
}

/// Convert `EVENT_TYPE_ACTIVITY_TASK_SCHEDULED` into `ActivityTaskScheduled`.
///
/// Tags already in PascalCase are returned unchanged.
pub fn normalize_event_type(raw: &str) -> String {
    let Some(rest) = raw.strip_prefix(EVENT_TYPE_PREFIX) else {
        return raw.to_string();
    };

    rest.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn parse_event_id(obj: &serde_json::Value) -> Result<i64, InterchangeError> {
    let raw = obj
        .get("eventId")
        .or_else(|| obj.get("id"))
        .ok_or_else(|| InterchangeError::MissingField {
            field: "eventId".to_string(),
        })?;

    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| InterchangeError::InvalidEvent {
        id: raw.to_string(),
        message: "event id is not an integer".to_string(),
    })
}

/// Attributes come from an explicit `attributes` object, or from the single
/// `*EventAttributes` key. In the latter case a leading `type` entry records
/// which key they came from.
fn parse_attributes(obj: &serde_json::Value) -> Attributes {
    if let Some(attrs) = obj.get("attributes").and_then(|a| a.as_object()) {
        return attrs
            .iter()
            .map(|(k, v)| (k.clone(), AttributeValue::from_json(v)))
            .collect();
    }

    let mut attributes = Attributes::new();
    let Some(fields) = obj.as_object() else {
        return attributes;
    };

    let typed = fields
        .iter()
        .find(|(k, v)| k.ends_with(ATTRIBUTES_SUFFIX) && v.is_object());

    if let Some((key, value)) = typed {
        attributes.insert("type".to_string(), AttributeValue::text(key.clone()));
        if let Some(inner) = value.as_object() {
            for (k, v) in inner {
                attributes.insert(k.clone(), AttributeValue::from_json(v));
            }
        }
    }

    attributes
}
