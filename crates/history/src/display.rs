//! Per-attribute display decisions for event detail views.

use hindsight_interchange::{AttributeValue, Attributes};
use serde_json::Value;

/// Keys rendered as plain text rather than inside a code block.
pub const PLAIN_TEXT_KEYS: [&str; 8] = [
    "activityId",
    "attempt",
    "binaryChecksum",
    "identity",
    "parentInitiatedEventId",
    "requestId",
    "scheduledEventId",
    "startedEventId",
];

/// Keys whose value is a run id that links to that run.
pub const WORKFLOW_LINK_KEYS: [&str; 6] = [
    "baseRunId",
    "continuedExecutionRunId",
    "firstExecutionRunId",
    "newExecutionRunId",
    "newRunId",
    "originalExecutionRunId",
];

/// Key whose value is a task queue name that links to its workers.
pub const WORKERS_LINK_KEY: &str = "taskQueueName";

pub fn should_display_as_plain_text(key: &str) -> bool {
    PLAIN_TEXT_KEYS.contains(&key)
}

pub fn workflow_link_key(key: &str) -> bool {
    WORKFLOW_LINK_KEYS.contains(&key)
}

pub fn workers_link_key(key: &str) -> bool {
    key == WORKERS_LINK_KEY
}

/// Whether a nested attribute value is worth a row in the detail view.
pub fn should_display_nested_attribute(value: &AttributeValue) -> bool {
    if value.is_null() {
        return false;
    }
    match value {
        AttributeValue::List(items) => !items.is_empty(),
        other => other.as_str() != Some(""),
    }
}

/// What a code block shows for an attribute.
///
/// Containers are unwrapped to their interesting member: `payloads` of a
/// payload list, `indexedFields` of search attributes, `points` of a
/// histogram. Anything else is shown as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeBlockValue<'a> {
    Text(&'a str),
    PayloadList(&'a [AttributeValue]),
    SearchAttributes(&'a Attributes),
    HistogramPoints(&'a [AttributeValue]),
    Value(&'a AttributeValue),
}

impl CodeBlockValue<'_> {
    pub fn to_json(&self) -> Value {
        match self {
            CodeBlockValue::Text(s) => Value::String(s.to_string()),
            CodeBlockValue::PayloadList(items) | CodeBlockValue::HistogramPoints(items) => {
                Value::Array(items.iter().map(AttributeValue::to_json).collect())
            }
            CodeBlockValue::SearchAttributes(fields) => {
                hindsight_interchange::attributes_to_json(fields)
            }
            CodeBlockValue::Value(value) => value.to_json(),
        }
    }

    /// Text blocks render verbatim; everything else as indented JSON.
    pub fn render(&self) -> String {
        match self {
            CodeBlockValue::Text(s) => s.to_string(),
            other => {
                let json = other.to_json();
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
            }
        }
    }
}

pub fn code_block_value(value: &AttributeValue) -> CodeBlockValue<'_> {
    if let Some(s) = value.as_str() {
        return CodeBlockValue::Text(s);
    }

    if let AttributeValue::Nested(attrs) = value {
        if let Some(items) = attrs.get("payloads").and_then(AttributeValue::as_list) {
            return CodeBlockValue::PayloadList(items);
        }
        if let Some(fields) = attrs.get("indexedFields").and_then(AttributeValue::as_nested) {
            return CodeBlockValue::SearchAttributes(fields);
        }
        if let Some(points) = attrs.get("points").and_then(AttributeValue::as_list) {
            return CodeBlockValue::HistogramPoints(points);
        }
    }

    CodeBlockValue::Value(value)
}
