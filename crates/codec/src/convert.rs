//! Whole-event payload conversion.
//!
//! [`PayloadConverter`] deep-walks event attribute trees and replaces every
//! raw payload with its decoded value. Without a remote converter it
//! applies [`decode_payload`] and marks the status `NotRequested`. With one
//! it publishes `Pending`, sends every raw payload in one batch, and
//! publishes `Success` or `Failure`; on failure the local decoding is kept.
//!
//! Input events are never mutated; conversions return new events.

use crate::converter::{ConverterConfig, DataConverter};
use crate::decode::decode_payload;
use crate::status::{ConversionStatus, RequestTicket, StatusCell};
use hindsight_interchange::{AttributeValue, Attributes, DecodedValue, Payload, WorkflowEvent};
use std::sync::Arc;

/// The result of one conversion request.
///
/// `ticket` identifies the request; if
/// [`StatusCell::is_current`] no longer holds for it, a newer conversion
/// was started and `converted` should not be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    pub converted: T,
    pub ticket: RequestTicket,
    pub status: ConversionStatus,
}

/// Converts payloads inside events, locally or through a remote converter.
pub struct PayloadConverter {
    converter: Option<Arc<dyn DataConverter>>,
    status: StatusCell,
}

impl PayloadConverter {
    /// Local decoding only.
    pub fn local(status: StatusCell) -> Self {
        PayloadConverter {
            converter: None,
            status,
        }
    }

    pub fn with_converter(converter: Arc<dyn DataConverter>, status: StatusCell) -> Self {
        PayloadConverter {
            converter: Some(converter),
            status,
        }
    }

    /// Use the HTTP converter when `config` names an endpoint.
    pub fn from_config(config: &ConverterConfig, status: StatusCell) -> Self {
        match config.build_converter() {
            Some(http) => PayloadConverter::with_converter(Arc::new(http), status),
            None => PayloadConverter::local(status),
        }
    }

    pub fn status(&self) -> &StatusCell {
        &self.status
    }

    pub fn has_remote(&self) -> bool {
        self.converter.is_some()
    }

    /// Convert every payload in one event.
    pub async fn convert_event(&self, event: &WorkflowEvent) -> Conversion<WorkflowEvent> {
        let Conversion {
            converted,
            ticket,
            status,
        } = self.convert_events(std::slice::from_ref(event)).await;
        Conversion {
            converted: converted
                .into_iter()
                .next()
                .unwrap_or_else(|| decode_event(event)),
            ticket,
            status,
        }
    }

    /// Convert every payload in a batch of events with a single remote
    /// request.
    pub async fn convert_events(&self, events: &[WorkflowEvent]) -> Conversion<Vec<WorkflowEvent>> {
        let Some(converter) = &self.converter else {
            let ticket = self.status.mark_not_requested();
            return Conversion {
                converted: events.iter().map(decode_event).collect(),
                ticket,
                status: ConversionStatus::NotRequested,
            };
        };

        let ticket = self.status.begin();

        let mut raw = Vec::new();
        for event in events {
            collect_raw_attributes(&event.attributes, &mut raw);
        }
        let raw: Vec<Payload> = raw.into_iter().cloned().collect();

        let outcome = if raw.is_empty() {
            Ok(Vec::new())
        } else {
            converter.decode(&raw).await
        };

        let (converted, status) = match outcome {
            Ok(decoded) if decoded.len() == raw.len() => {
                let mut remote = decoded.into_iter();
                let mut next = |payload: &Payload| {
                    remote.next().unwrap_or_else(|| decode_payload(payload))
                };
                let converted = events
                    .iter()
                    .map(|event| map_event(event, &mut next))
                    .collect();
                (converted, ConversionStatus::Success)
            }
            Ok(decoded) => {
                tracing::warn!(
                    converter = converter.converter_id(),
                    expected = raw.len(),
                    received = decoded.len(),
                    "remote converter returned the wrong number of payloads; using local decoding"
                );
                (
                    events.iter().map(decode_event).collect(),
                    ConversionStatus::Failure,
                )
            }
            Err(e) => {
                tracing::warn!(
                    converter = converter.converter_id(),
                    error = %e,
                    "remote payload conversion failed; using local decoding"
                );
                (
                    events.iter().map(decode_event).collect(),
                    ConversionStatus::Failure,
                )
            }
        };

        if !self.status.finish(ticket, status) {
            tracing::debug!(
                ticket = ticket.generation(),
                "conversion superseded before completion"
            );
        }

        Conversion {
            converted,
            ticket,
            status,
        }
    }
}

/// Decode every payload in `event` with the local codec only.
pub fn decode_event(event: &WorkflowEvent) -> WorkflowEvent {
    map_event(event, &mut |payload: &Payload| decode_payload(payload))
}

// ── Attribute tree walking ──────────────────────────────────────────
//
// `collect_*` and `map_*` visit raw payloads in the same order: map entries
// in insertion order, list items front to back.

fn collect_raw_attributes<'a>(attrs: &'a Attributes, out: &mut Vec<&'a Payload>) {
    for value in attrs.values() {
        collect_raw_value(value, out);
    }
}

fn collect_raw_value<'a>(value: &'a AttributeValue, out: &mut Vec<&'a Payload>) {
    match value {
        AttributeValue::Payload(DecodedValue::Raw(payload)) => out.push(payload),
        AttributeValue::Nested(attrs) => collect_raw_attributes(attrs, out),
        AttributeValue::List(items) => {
            for item in items {
                collect_raw_value(item, out);
            }
        }
        AttributeValue::Payload(_) | AttributeValue::Scalar(_) => {}
    }
}

fn map_event<F>(event: &WorkflowEvent, f: &mut F) -> WorkflowEvent
where
    F: FnMut(&Payload) -> DecodedValue,
{
    WorkflowEvent {
        id: event.id,
        event_time: event.event_time,
        event_type: event.event_type.clone(),
        attributes: map_attributes(&event.attributes, f),
    }
}

fn map_attributes<F>(attrs: &Attributes, f: &mut F) -> Attributes
where
    F: FnMut(&Payload) -> DecodedValue,
{
    attrs
        .iter()
        .map(|(key, value)| (key.clone(), map_value(value, f)))
        .collect()
}

fn map_value<F>(value: &AttributeValue, f: &mut F) -> AttributeValue
where
    F: FnMut(&Payload) -> DecodedValue,
{
    match value {
        AttributeValue::Payload(DecodedValue::Raw(payload)) => AttributeValue::Payload(f(payload)),
        AttributeValue::Nested(attrs) => AttributeValue::Nested(map_attributes(attrs, f)),
        AttributeValue::List(items) => {
            AttributeValue::List(items.iter().map(|item| map_value(item, f)).collect())
        }
        other => other.clone(),
    }
}
