//! View rendering for grouped histories.
//!
//! Every view renders from the grouped entity sequence. `json` is a
//! machine-readable document; the text views print one line per entity,
//! and `full` additionally lists each group's member events beneath it.

use crate::grouping::{EventGroup, HistoryEntity, HistoryItem};
use crate::selector::single_attribute_for_event;
use hindsight_interchange::{EventView, WorkflowEvent};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Serialize entities for the json view.
pub fn render_json(entities: &[HistoryEntity]) -> Value {
    Value::Array(entities.iter().map(entity_to_json).collect())
}

/// Groups become `{id, name, family, closed, events}`; singletons are the
/// event object itself.
pub fn entity_to_json(entity: &HistoryEntity) -> Value {
    match entity {
        HistoryEntity::Event(event) => event.to_json(),
        HistoryEntity::Group(group) => group_to_json(group),
    }
}

fn group_to_json(group: &EventGroup) -> Value {
    json!({
        "id": group.id().to_string(),
        "name": group.name(),
        "family": group.family().as_str(),
        "closed": group.is_closed(),
        "events": group.events().iter().map(WorkflowEvent::to_json).collect::<Vec<_>>(),
    })
}

/// Render entities in the given view. Text views end every line with a
/// newline; the json view is pretty-printed.
pub fn render_view(entities: &[HistoryEntity], view: EventView) -> String {
    if view == EventView::Json {
        let json = render_json(entities);
        return serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
    }

    let mut out = String::new();
    for entity in entities {
        out.push_str(&entity_line(entity, view));
        out.push('\n');

        if view == EventView::Full {
            if let Some(group) = entity.as_group() {
                for event in group.events() {
                    out.push_str("    ");
                    out.push_str(&entity_line(event, view));
                    out.push('\n');
                }
            }
        }
    }
    out
}

/// One text line: id, type, time (not in compact), group label, summary.
pub fn entity_line<T: HistoryItem + ?Sized>(item: &T, view: EventView) -> String {
    let mut line = format!("{:>5}  {}", item.id(), item.event_type());

    if view != EventView::Compact {
        line.push_str("  ");
        line.push_str(&format_time(item.event_time()));
    }

    if let Some(group) = item.as_group() {
        let state = if group.is_closed() { "closed" } else { "open" };
        line.push_str(&format!(
            "  [{} {} {}]",
            group.family(),
            group.name(),
            state
        ));
    }

    if let Some(summary) = single_attribute_for_event(Some(item)) {
        line.push_str(&format!("  {}: {}", summary.key, summary.value.display()));
    }

    line
}

fn format_time(time: OffsetDateTime) -> String {
    time.format(&Rfc3339).unwrap_or_else(|_| time.to_string())
}
