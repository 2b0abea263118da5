//! Summary attribute selection.
//!
//! Compact and summary views show one attribute per row. The choice is
//! made from the event's decoded attributes in their natural order:
//! the first preferred key that is eligible wins, otherwise the first
//! eligible attribute at all.

use crate::grouping::HistoryItem;
use hindsight_interchange::{AttributeValue, DecodedValue, WorkflowEvent};
use serde::Serialize;

/// Keys that summarize an event better than whatever comes first.
pub const PREFERRED_SUMMARY_KEYS: [&str; 6] = [
    "failure",
    "input",
    "activityType",
    "parentInitiatedEventId",
    "workflowType",
    "taskQueue",
];

/// Whether an attribute may be shown as a summary.
///
/// Null and empty values carry no information, including a payload that
/// decodes to JSON `null`. `"0s"` is the engine's rendering of an unset
/// duration and `type` is the event's own type.
pub fn should_display_attribute(key: &str, value: &AttributeValue) -> bool {
    if key == "type" || value.is_null() {
        return false;
    }
    if let AttributeValue::Payload(DecodedValue::Json(serde_json::Value::Null)) = value {
        return false;
    }
    !matches!(value.as_str(), Some("") | Some("0s"))
}

fn is_preferred(key: &str) -> bool {
    PREFERRED_SUMMARY_KEYS.contains(&key)
}

/// A selected attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Text(String),
    Structured(AttributeValue),
}

impl SummaryValue {
    /// One-line rendering: text as-is, structures as compact JSON.
    pub fn display(&self) -> String {
        match self {
            SummaryValue::Text(s) => s.clone(),
            SummaryValue::Structured(v) => v.to_json().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryAttribute {
    pub key: String,
    pub value: SummaryValue,
}

impl SummaryAttribute {
    /// The placeholder returned for an absent event.
    pub fn empty() -> Self {
        SummaryAttribute {
            key: String::new(),
            value: SummaryValue::Text(String::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// Select the summary attribute for an event or group.
///
/// Groups are summarized by their last event. An absent item yields the
/// empty attribute; an item with nothing eligible yields `None`.
pub fn single_attribute_for_event<T: HistoryItem + ?Sized>(
    item: Option<&T>,
) -> Option<SummaryAttribute> {
    match item {
        Some(item) => summary_attribute(item.last_event()),
        None => Some(SummaryAttribute::empty()),
    }
}

/// Select the summary attribute for a single event.
pub fn summary_attribute(event: &WorkflowEvent) -> Option<SummaryAttribute> {
    let eligible = || {
        event
            .attributes
            .iter()
            .filter(|(key, value)| should_display_attribute(key, value))
    };

    eligible()
        .find(|(key, _)| is_preferred(key))
        .or_else(|| eligible().next())
        .map(|(key, value)| format_summary(key, value))
}

/// Objects are flattened one level: `{activityType: {name: x}}` becomes
/// `activityTypeName: x`. Payloads decoded to a JSON object flatten the
/// same way.
fn format_summary(key: &str, value: &AttributeValue) -> SummaryAttribute {
    match value {
        AttributeValue::Nested(attrs) => {
            if let Some((inner_key, inner)) = attrs.first() {
                return SummaryAttribute {
                    key: format!("{}{}", key, capitalize(inner_key)),
                    value: summary_value(inner),
                };
            }
        }
        AttributeValue::Payload(DecodedValue::Json(serde_json::Value::Object(obj))) => {
            if let Some((inner_key, inner)) = obj.iter().next() {
                return SummaryAttribute {
                    key: format!("{}{}", key, capitalize(inner_key)),
                    value: decoded_summary_value(inner),
                };
            }
        }
        _ => {}
    }

    SummaryAttribute {
        key: key.to_string(),
        value: summary_value(value),
    }
}

fn summary_value(value: &AttributeValue) -> SummaryValue {
    match value {
        AttributeValue::Scalar(serde_json::Value::String(s)) => SummaryValue::Text(s.clone()),
        AttributeValue::Scalar(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            SummaryValue::Text(v.to_string())
        }
        other => match other.as_str() {
            Some(s) => SummaryValue::Text(s.to_string()),
            None => SummaryValue::Structured(other.clone()),
        },
    }
}

fn decoded_summary_value(value: &serde_json::Value) -> SummaryValue {
    match value {
        serde_json::Value::String(s) => SummaryValue::Text(s.clone()),
        serde_json::Value::Number(_) | serde_json::Value::Bool(_) => {
            SummaryValue::Text(value.to_string())
        }
        other => SummaryValue::Structured(AttributeValue::Payload(DecodedValue::Json(other.clone()))),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_events;
    use serde_json::json;
    use time::macros::datetime;

    fn event_with(attrs: serde_json::Value) -> WorkflowEvent {
        let mut event = WorkflowEvent::new(1, datetime!(2022-04-01 12:00 UTC), "ActivityTaskScheduled");
        if let serde_json::Value::Object(obj) = attrs {
            for (k, v) in obj {
                event = event.with_attribute(k, AttributeValue::from_json(&v));
            }
        }
        event
    }

    #[test]
    fn preferred_nested_key_is_flattened() {
        let event = event_with(json!({
            "activityType": {"name": "Foo"},
            "identity": "worker-1"
        }));
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.key, "activityTypeName");
        assert_eq!(summary.value, SummaryValue::Text("Foo".to_string()));
    }

    #[test]
    fn preferred_key_beats_earlier_keys() {
        let event = event_with(json!({
            "identity": "worker-1",
            "taskQueue": {"name": "payments", "kind": "Normal"}
        }));
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.key, "taskQueueName");
        assert_eq!(summary.value.display(), "payments");
    }

    #[test]
    fn preferred_keys_follow_natural_order() {
        // "input" ranks above "parentInitiatedEventId" in the preferred
        // list, but appears later in the event.
        let event = event_with(json!({
            "parentInitiatedEventId": "3",
            "input": "payload"
        }));
        assert_eq!(summary_attribute(&event).unwrap().key, "parentInitiatedEventId");
    }

    #[test]
    fn ineligible_values_are_skipped() {
        let event = event_with(json!({
            "type": "ActivityTaskScheduled",
            "failure": null,
            "input": "",
            "startToCloseTimeout": "0s",
            "attempt": 2
        }));
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.key, "attempt");
        assert_eq!(summary.value, SummaryValue::Text("2".to_string()));
    }

    #[test]
    fn nothing_eligible_is_none() {
        let event = event_with(json!({"type": "TimerFired", "identity": ""}));
        assert_eq!(summary_attribute(&event), None);
    }

    #[test]
    fn absent_item_is_the_empty_attribute() {
        let summary = single_attribute_for_event::<WorkflowEvent>(None).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary, SummaryAttribute::empty());
    }

    #[test]
    fn empty_nested_value_keeps_its_key() {
        let event = event_with(json!({"header": {}}));
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.key, "header");
        assert!(matches!(summary.value, SummaryValue::Structured(_)));
    }

    #[test]
    fn decoded_payload_text_is_shown_as_text() {
        let event = WorkflowEvent::new(1, datetime!(2022-04-01 12:00 UTC), "ActivityTaskCompleted")
            .with_attribute(
                "result",
                AttributeValue::Payload(DecodedValue::Text("test@test.com".to_string())),
            );
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.value, SummaryValue::Text("test@test.com".to_string()));
    }

    #[test]
    fn decoded_json_object_is_flattened() {
        let event = WorkflowEvent::new(1, datetime!(2022-04-01 12:00 UTC), "ActivityTaskCompleted")
            .with_attribute(
                "result",
                AttributeValue::Payload(DecodedValue::Json(json!({"amount": 3, "currency": "EUR"}))),
            );
        let summary = summary_attribute(&event).unwrap();
        assert_eq!(summary.key, "resultAmount");
        assert_eq!(summary.value, SummaryValue::Text("3".to_string()));
    }

    #[test]
    fn decoded_json_null_is_not_eligible() {
        let event = WorkflowEvent::new(1, datetime!(2022-04-01 12:00 UTC), "ActivityTaskCompleted")
            .with_attribute(
                "result",
                AttributeValue::Payload(DecodedValue::Json(serde_json::Value::Null)),
            )
            .with_attribute("identity", AttributeValue::text("worker-1"));
        assert!(!should_display_attribute(
            "result",
            &AttributeValue::Payload(DecodedValue::Json(serde_json::Value::Null))
        ));
        assert_eq!(summary_attribute(&event).unwrap().key, "identity");
    }

    #[test]
    fn group_is_summarized_by_last_event() {
        let scheduled = WorkflowEvent::new(1, datetime!(2022-04-01 12:00 UTC), "ActivityTaskScheduled")
            .with_attribute("activityType", AttributeValue::from_json(&json!({"name": "Foo"})));
        let completed = WorkflowEvent::new(2, datetime!(2022-04-01 12:00:01 UTC), "ActivityTaskCompleted")
            .with_attribute("result", AttributeValue::text("done"))
            .with_attribute("failure", AttributeValue::Scalar(serde_json::Value::Null))
            .with_attribute("scheduledEventId", AttributeValue::Scalar(json!(1)));

        let entities = group_events(vec![scheduled, completed]);
        let summary = single_attribute_for_event(entities.first()).unwrap();
        assert_eq!(summary.key, "result");
        assert_eq!(summary.value.display(), "done");
    }
}
