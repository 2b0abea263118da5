//! Event grouping engine.
//!
//! Folds an ascending stream of raw lifecycle events ("scheduled" →
//! "started" → "completed") into [`HistoryEntity`] values: multi-event
//! [`EventGroup`]s or standalone events.
//!
//! ## Classification
//!
//! Every event type is one of:
//! - **initiating**: opens a group keyed by the event's own id
//! - **continuing**: joins the open group named by its correlation
//!   attribute (e.g. `scheduledEventId`); terminal continuations close it
//! - **standalone**: never grouped
//!
//! The lifecycle families live in [`LIFECYCLES`] as data.
//!
//! ## Ordering
//!
//! Output entities are ordered by their first-seen event id: a group sits
//! where its initiating event was, not where it closed. A continuing event
//! whose group is unknown (pagination boundary) or already closed is
//! surfaced on its own, never dropped or merged.

use hindsight_interchange::{AttributeValue, WorkflowEvent};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use time::OffsetDateTime;

// ──────────────────────────────────────────────
// Lifecycle table
// ──────────────────────────────────────────────

/// A lifecycle family: the kind of logical unit a group represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventFamily {
    Activity,
    WorkflowTask,
    Timer,
    ChildWorkflow,
    SignalExternal,
    CancelExternal,
}

impl EventFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventFamily::Activity => "Activity",
            EventFamily::WorkflowTask => "WorkflowTask",
            EventFamily::Timer => "Timer",
            EventFamily::ChildWorkflow => "ChildWorkflow",
            EventFamily::SignalExternal => "SignalExternal",
            EventFamily::CancelExternal => "CancelExternal",
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A follow-up event type within a lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    pub event_type: &'static str,
    /// Receipt closes the group.
    pub terminal: bool,
}

const fn step(event_type: &'static str) -> Continuation {
    Continuation {
        event_type,
        terminal: false,
    }
}

const fn terminal(event_type: &'static str) -> Continuation {
    Continuation {
        event_type,
        terminal: true,
    }
}

/// How one family's events are recognized and correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    pub family: EventFamily,
    pub initiator: &'static str,
    /// Attribute on continuing events holding the initiating event's id.
    pub correlation_key: &'static str,
    pub continuing: &'static [Continuation],
    /// Attribute path on the initiating event naming the group.
    pub name_path: &'static [&'static str],
}

pub const LIFECYCLES: &[Lifecycle] = &[
    Lifecycle {
        family: EventFamily::Activity,
        initiator: "ActivityTaskScheduled",
        correlation_key: "scheduledEventId",
        continuing: &[
            step("ActivityTaskStarted"),
            step("ActivityTaskCancelRequested"),
            terminal("ActivityTaskCompleted"),
            terminal("ActivityTaskFailed"),
            terminal("ActivityTaskTimedOut"),
            terminal("ActivityTaskCanceled"),
        ],
        name_path: &["activityType", "name"],
    },
    Lifecycle {
        family: EventFamily::WorkflowTask,
        initiator: "WorkflowTaskScheduled",
        correlation_key: "scheduledEventId",
        continuing: &[
            step("WorkflowTaskStarted"),
            terminal("WorkflowTaskCompleted"),
            terminal("WorkflowTaskFailed"),
            terminal("WorkflowTaskTimedOut"),
        ],
        name_path: &[],
    },
    Lifecycle {
        family: EventFamily::Timer,
        initiator: "TimerStarted",
        correlation_key: "startedEventId",
        continuing: &[terminal("TimerFired"), terminal("TimerCanceled")],
        name_path: &["timerId"],
    },
    Lifecycle {
        family: EventFamily::ChildWorkflow,
        initiator: "StartChildWorkflowExecutionInitiated",
        correlation_key: "initiatedEventId",
        continuing: &[
            step("ChildWorkflowExecutionStarted"),
            terminal("StartChildWorkflowExecutionFailed"),
            terminal("ChildWorkflowExecutionCompleted"),
            terminal("ChildWorkflowExecutionFailed"),
            terminal("ChildWorkflowExecutionTimedOut"),
            terminal("ChildWorkflowExecutionCanceled"),
            terminal("ChildWorkflowExecutionTerminated"),
        ],
        name_path: &["workflowType", "name"],
    },
    Lifecycle {
        family: EventFamily::SignalExternal,
        initiator: "SignalExternalWorkflowExecutionInitiated",
        correlation_key: "initiatedEventId",
        continuing: &[
            terminal("ExternalWorkflowExecutionSignaled"),
            terminal("SignalExternalWorkflowExecutionFailed"),
        ],
        name_path: &["signalName"],
    },
    Lifecycle {
        family: EventFamily::CancelExternal,
        initiator: "RequestCancelExternalWorkflowExecutionInitiated",
        correlation_key: "initiatedEventId",
        continuing: &[
            terminal("ExternalWorkflowExecutionCancelRequested"),
            terminal("RequestCancelExternalWorkflowExecutionFailed"),
        ],
        name_path: &[],
    },
];

/// The grouping role of an event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRole {
    Initiating(&'static Lifecycle),
    Continuing {
        lifecycle: &'static Lifecycle,
        terminal: bool,
    },
    Standalone,
}

/// Classify an event type against [`LIFECYCLES`].
pub fn classify(event_type: &str) -> EventRole {
    for lifecycle in LIFECYCLES {
        if lifecycle.initiator == event_type {
            return EventRole::Initiating(lifecycle);
        }
        if let Some(c) = lifecycle
            .continuing
            .iter()
            .find(|c| c.event_type == event_type)
        {
            return EventRole::Continuing {
                lifecycle,
                terminal: c.terminal,
            };
        }
    }
    EventRole::Standalone
}

// ──────────────────────────────────────────────
// EventGroup
// ──────────────────────────────────────────────

/// Correlated events forming one logical lifecycle. Never empty; events
/// are kept in ascending id order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGroup {
    id: i64,
    family: EventFamily,
    name: String,
    events: Vec<WorkflowEvent>,
    closed: bool,
}

impl EventGroup {
    fn open(initiating: WorkflowEvent, lifecycle: &Lifecycle) -> Self {
        let name = group_name(&initiating, lifecycle);
        EventGroup {
            id: initiating.id,
            family: lifecycle.family,
            name,
            events: vec![initiating],
            closed: false,
        }
    }

    fn push(&mut self, event: WorkflowEvent, terminal: bool) {
        self.events.push(event);
        if terminal {
            self.closed = true;
        }
    }

    /// Id of the initiating event.
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn family(&self) -> EventFamily {
        self.family
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> &[WorkflowEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether a terminal event has been received.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn initial_event(&self) -> &WorkflowEvent {
        &self.events[0]
    }

    /// The most advanced lifecycle state.
    pub fn last_event(&self) -> &WorkflowEvent {
        &self.events[self.events.len() - 1]
    }
}

fn group_name(event: &WorkflowEvent, lifecycle: &Lifecycle) -> String {
    let mut path = lifecycle.name_path.iter();
    let first = path
        .next()
        .and_then(|key| event.attribute(key));
    let value = path.fold(first, |value, key| {
        value
            .and_then(AttributeValue::as_nested)
            .and_then(|attrs| attrs.get(*key))
    });

    value
        .and_then(AttributeValue::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| lifecycle.family.as_str().to_string())
}

// ──────────────────────────────────────────────
// HistoryEntity + HistoryItem
// ──────────────────────────────────────────────

/// One entry in the grouped history.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntity {
    Event(WorkflowEvent),
    Group(EventGroup),
}

/// What views need from an entry, without knowing whether it is a group.
pub trait HistoryItem {
    /// First-seen event id; the entry's position in the history.
    fn id(&self) -> i64;

    fn first_event(&self) -> &WorkflowEvent;

    /// The event that represents this item (time, type, summary).
    fn last_event(&self) -> &WorkflowEvent;

    fn as_group(&self) -> Option<&EventGroup> {
        None
    }

    fn is_group(&self) -> bool {
        self.as_group().is_some()
    }

    fn event_time(&self) -> OffsetDateTime {
        self.last_event().event_time
    }

    fn event_type(&self) -> &str {
        &self.last_event().event_type
    }
}

impl HistoryItem for WorkflowEvent {
    fn id(&self) -> i64 {
        self.id
    }

    fn first_event(&self) -> &WorkflowEvent {
        self
    }

    fn last_event(&self) -> &WorkflowEvent {
        self
    }
}

impl HistoryItem for EventGroup {
    fn id(&self) -> i64 {
        self.id
    }

    fn first_event(&self) -> &WorkflowEvent {
        self.initial_event()
    }

    fn last_event(&self) -> &WorkflowEvent {
        EventGroup::last_event(self)
    }

    fn as_group(&self) -> Option<&EventGroup> {
        Some(self)
    }
}

impl HistoryItem for HistoryEntity {
    fn id(&self) -> i64 {
        match self {
            HistoryEntity::Event(e) => e.id,
            HistoryEntity::Group(g) => g.id,
        }
    }

    fn first_event(&self) -> &WorkflowEvent {
        match self {
            HistoryEntity::Event(e) => e,
            HistoryEntity::Group(g) => g.initial_event(),
        }
    }

    fn last_event(&self) -> &WorkflowEvent {
        match self {
            HistoryEntity::Event(e) => e,
            HistoryEntity::Group(g) => EventGroup::last_event(g),
        }
    }

    fn as_group(&self) -> Option<&EventGroup> {
        match self {
            HistoryEntity::Event(_) => None,
            HistoryEntity::Group(g) => Some(g),
        }
    }
}

// ──────────────────────────────────────────────
// EventGrouper
// ──────────────────────────────────────────────

/// Grouping state for one history view.
///
/// Scoped to a single workflow execution; create a new grouper per
/// history being displayed. Pages may be fed oldest-first or newest-first:
/// a page holding an event older than one already folded triggers a single
/// refold, which produces the same grouping as one ascending pass.
#[derive(Debug, Default)]
pub struct EventGrouper {
    entities: Vec<HistoryEntity>,
    /// Open group id → index into `entities`.
    open: HashMap<i64, usize>,
    closed: HashSet<i64>,
    seen: HashSet<i64>,
    last_id: Option<i64>,
}

impl EventGrouper {
    pub fn new() -> Self {
        EventGrouper::default()
    }

    pub fn push(&mut self, event: WorkflowEvent) {
        self.extend(std::iter::once(event));
    }

    /// Fold one page of events.
    ///
    /// The page is sorted before folding, so a newest-first page costs at
    /// most one refold rather than one per event.
    pub fn extend<I: IntoIterator<Item = WorkflowEvent>>(&mut self, events: I) {
        let mut batch: Vec<WorkflowEvent> = Vec::new();
        for event in events {
            if self.seen.insert(event.id) {
                batch.push(event);
            } else {
                tracing::debug!(event_id = event.id, "ignoring duplicate event");
            }
        }
        batch.sort_by_key(|e| e.id);

        let Some(first) = batch.first() else {
            return;
        };
        match self.last_id {
            Some(last) if first.id < last => self.refold(batch),
            _ => {
                for event in batch {
                    self.fold(event);
                }
            }
        }
    }

    pub fn entities(&self) -> &[HistoryEntity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<HistoryEntity> {
        self.entities
    }

    /// Number of groups still awaiting a terminal event.
    pub fn open_groups(&self) -> usize {
        self.open.len()
    }

    fn fold(&mut self, event: WorkflowEvent) {
        self.last_id = Some(event.id);

        match classify(&event.event_type) {
            EventRole::Initiating(lifecycle) => {
                self.open.insert(event.id, self.entities.len());
                self.entities
                    .push(HistoryEntity::Group(EventGroup::open(event, lifecycle)));
            }
            EventRole::Continuing {
                lifecycle,
                terminal,
            } => {
                let key = event
                    .attribute(lifecycle.correlation_key)
                    .and_then(AttributeValue::as_i64);
                let target = key.and_then(|k| self.open.get(&k).map(|&index| (k, index)));

                match target {
                    Some((key, index)) => {
                        let group = match self.entities.get_mut(index) {
                            Some(HistoryEntity::Group(g)) if g.family == lifecycle.family => g,
                            _ => {
                                self.standalone(event, key, "correlated entry is not a matching group");
                                return;
                            }
                        };
                        group.push(event, terminal);
                        if terminal {
                            self.open.remove(&key);
                            self.closed.insert(key);
                        }
                    }
                    None => {
                        let key = key.unwrap_or_default();
                        let reason = if self.closed.contains(&key) {
                            "group already closed"
                        } else {
                            "no open group"
                        };
                        self.standalone(event, key, reason);
                    }
                }
            }
            EventRole::Standalone => self.entities.push(HistoryEntity::Event(event)),
        }
    }

    fn standalone(&mut self, event: WorkflowEvent, key: i64, reason: &str) {
        tracing::debug!(
            event_id = event.id,
            event_type = %event.event_type,
            correlation_id = key,
            reason,
            "continuing event surfaced standalone"
        );
        self.entities.push(HistoryEntity::Event(event));
    }

    fn refold(&mut self, batch: Vec<WorkflowEvent>) {
        tracing::debug!(events = batch.len(), "out-of-order page, regrouping");

        let mut events = into_events(std::mem::take(&mut self.entities));
        events.extend(batch);
        events.sort_by_key(|e| e.id);

        let seen = std::mem::take(&mut self.seen);
        *self = EventGrouper {
            seen,
            ..EventGrouper::default()
        };
        for event in events {
            self.fold(event);
        }
    }
}

fn into_events(entities: Vec<HistoryEntity>) -> Vec<WorkflowEvent> {
    entities
        .into_iter()
        .flat_map(|entity| match entity {
            HistoryEntity::Event(e) => vec![e],
            HistoryEntity::Group(g) => g.events,
        })
        .collect()
}

/// Group a batch of events in one pass.
///
/// Events are ordered ascending by id first; duplicate ids keep their
/// first occurrence.
pub fn group_events<I: IntoIterator<Item = WorkflowEvent>>(events: I) -> Vec<HistoryEntity> {
    let mut events: Vec<WorkflowEvent> = events.into_iter().collect();
    events.sort_by_key(|e| e.id);

    let mut grouper = EventGrouper::new();
    grouper.extend(events);
    grouper.into_entities()
}

/// All events behind `entities`, ascending by id.
pub fn flatten(entities: &[HistoryEntity]) -> Vec<WorkflowEvent> {
    let mut events: Vec<WorkflowEvent> = entities
        .iter()
        .flat_map(|entity| match entity {
            HistoryEntity::Event(e) => std::slice::from_ref(e),
            HistoryEntity::Group(g) => g.events(),
        })
        .cloned()
        .collect();
    events.sort_by_key(|e| e.id);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_interchange::AttributeValue;
    use serde_json::json;
    use time::macros::datetime;

    fn event(id: i64, event_type: &str) -> WorkflowEvent {
        WorkflowEvent::new(
            id,
            datetime!(2022-04-01 12:00 UTC) + time::Duration::seconds(id),
            event_type,
        )
    }

    fn linked(id: i64, event_type: &str, key: &str, target: i64) -> WorkflowEvent {
        event(id, event_type).with_attribute(key, AttributeValue::Scalar(json!(target)))
    }

    #[test]
    fn classifies_roles() {
        assert!(matches!(
            classify("ActivityTaskScheduled"),
            EventRole::Initiating(l) if l.family == EventFamily::Activity
        ));
        assert!(matches!(
            classify("ActivityTaskStarted"),
            EventRole::Continuing { terminal: false, .. }
        ));
        assert!(matches!(
            classify("TimerFired"),
            EventRole::Continuing { terminal: true, .. }
        ));
        assert_eq!(classify("WorkflowExecutionStarted"), EventRole::Standalone);
        assert_eq!(classify("MarkerRecorded"), EventRole::Standalone);
    }

    #[test]
    fn lifecycle_event_types_are_unique() {
        let mut seen = HashSet::new();
        for lifecycle in LIFECYCLES {
            assert!(seen.insert(lifecycle.initiator));
            for c in lifecycle.continuing {
                assert!(seen.insert(c.event_type), "duplicate {}", c.event_type);
            }
        }
    }

    #[test]
    fn activity_lifecycle_forms_one_closed_group() {
        let entities = group_events(vec![
            event(1, "ActivityTaskScheduled"),
            linked(2, "ActivityTaskStarted", "scheduledEventId", 1),
            linked(3, "ActivityTaskCompleted", "scheduledEventId", 1),
        ]);

        assert_eq!(entities.len(), 1);
        let group = entities[0].as_group().unwrap();
        assert_eq!(group.id(), 1);
        assert_eq!(group.len(), 3);
        assert!(group.is_closed());
        assert_eq!(group.last_event().id, 3);
        assert_eq!(entities[0].event_type(), "ActivityTaskCompleted");
        assert_eq!(entities[0].event_time(), group.events()[2].event_time);
    }

    #[test]
    fn incomplete_lifecycle_stays_open() {
        let mut grouper = EventGrouper::new();
        grouper.extend(vec![
            event(1, "ActivityTaskScheduled"),
            linked(2, "ActivityTaskStarted", "scheduledEventId", 1),
        ]);
        assert_eq!(grouper.open_groups(), 1);
        assert!(!grouper.entities()[0].as_group().unwrap().is_closed());

        // next page completes it
        grouper.push(linked(3, "ActivityTaskCompleted", "scheduledEventId", 1));
        assert_eq!(grouper.open_groups(), 0);
        assert!(grouper.entities()[0].as_group().unwrap().is_closed());
    }

    #[test]
    fn orphan_continuation_is_standalone() {
        let entities = group_events(vec![
            linked(7, "ActivityTaskCompleted", "scheduledEventId", 5),
            event(8, "WorkflowExecutionCompleted"),
        ]);
        assert_eq!(entities.len(), 2);
        assert!(!entities[0].is_group());
        assert_eq!(entities[0].id(), 7);
    }

    #[test]
    fn continuation_without_correlation_attribute_is_standalone() {
        let entities = group_events(vec![
            event(1, "ActivityTaskScheduled"),
            event(2, "ActivityTaskStarted"),
        ]);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].as_group().unwrap().len(), 1);
        assert!(!entities[1].is_group());
    }

    #[test]
    fn events_after_close_are_not_merged() {
        let entities = group_events(vec![
            event(1, "TimerStarted"),
            linked(2, "TimerFired", "startedEventId", 1),
            linked(3, "TimerCanceled", "startedEventId", 1),
        ]);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].as_group().unwrap().len(), 2);
        assert_eq!(entities[1].id(), 3);
        assert!(!entities[1].is_group());
    }

    #[test]
    fn family_mismatch_is_not_merged() {
        let entities = group_events(vec![
            event(1, "TimerStarted"),
            linked(2, "ActivityTaskStarted", "scheduledEventId", 1),
        ]);
        assert_eq!(entities.len(), 2);
        assert!(!entities[1].is_group());
    }

    #[test]
    fn groups_keep_initiator_position() {
        let entities = group_events(vec![
            event(1, "WorkflowExecutionStarted"),
            event(2, "ActivityTaskScheduled"),
            event(3, "TimerStarted"),
            linked(4, "TimerFired", "startedEventId", 3),
            linked(5, "ActivityTaskStarted", "scheduledEventId", 2),
            event(6, "MarkerRecorded"),
            linked(7, "ActivityTaskCompleted", "scheduledEventId", 2),
        ]);

        let ids: Vec<i64> = entities.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 6]);
        assert_eq!(entities[1].as_group().unwrap().len(), 3);
        assert_eq!(entities[2].as_group().unwrap().len(), 2);
    }

    #[test]
    fn reverse_pages_refold_to_the_same_grouping() {
        let ascending = vec![
            event(1, "WorkflowTaskScheduled"),
            linked(2, "WorkflowTaskStarted", "scheduledEventId", 1),
            linked(3, "WorkflowTaskCompleted", "scheduledEventId", 1),
            event(4, "ActivityTaskScheduled"),
            linked(5, "ActivityTaskStarted", "scheduledEventId", 4),
            linked(6, "ActivityTaskFailed", "scheduledEventId", 4),
        ];
        let expected = group_events(ascending.clone());

        let mut grouper = EventGrouper::new();
        // newest page first, each page in its own descending order
        grouper.extend(ascending[3..].iter().rev().cloned());
        grouper.extend(ascending[..3].iter().rev().cloned());

        assert_eq!(grouper.entities(), expected.as_slice());
    }

    #[test]
    fn large_newest_first_page_matches_ascending_grouping() {
        let mut ascending = Vec::new();
        for n in 0..2000 {
            let scheduled = 2 * n + 1;
            ascending.push(event(scheduled, "ActivityTaskScheduled"));
            ascending.push(linked(
                scheduled + 1,
                "ActivityTaskCompleted",
                "scheduledEventId",
                scheduled,
            ));
        }
        let expected = group_events(ascending.clone());

        let mut grouper = EventGrouper::new();
        grouper.extend(ascending[2000..].iter().rev().cloned());
        grouper.extend(ascending[..2000].iter().rev().cloned());

        assert_eq!(grouper.entities().len(), 2000);
        assert_eq!(grouper.open_groups(), 0);
        assert_eq!(grouper.entities(), expected.as_slice());
    }

    #[test]
    fn duplicates_within_a_page_keep_first_occurrence() {
        let mut grouper = EventGrouper::new();
        grouper.extend(vec![
            event(2, "TimerStarted"),
            event(2, "MarkerRecorded"),
            event(1, "WorkflowExecutionStarted"),
        ]);
        let types: Vec<&str> = grouper.entities().iter().map(|e| e.event_type()).collect();
        assert_eq!(types, vec!["WorkflowExecutionStarted", "TimerStarted"]);
    }

    #[test]
    fn duplicates_are_ignored() {
        let mut grouper = EventGrouper::new();
        grouper.push(event(1, "ActivityTaskScheduled"));
        grouper.push(event(1, "ActivityTaskScheduled"));
        assert_eq!(grouper.entities().len(), 1);
        assert_eq!(grouper.entities()[0].as_group().unwrap().len(), 1);
    }

    #[test]
    fn regrouping_flattened_output_is_idempotent() {
        let entities = group_events(vec![
            event(1, "WorkflowExecutionStarted"),
            event(2, "StartChildWorkflowExecutionInitiated"),
            linked(3, "ChildWorkflowExecutionStarted", "initiatedEventId", 2),
            linked(4, "SignalExternalWorkflowExecutionFailed", "initiatedEventId", 99),
            linked(5, "ChildWorkflowExecutionCompleted", "initiatedEventId", 2),
        ]);
        assert_eq!(group_events(flatten(&entities)), entities);
    }

    #[test]
    fn group_names_come_from_initiating_event() {
        let scheduled = event(1, "ActivityTaskScheduled").with_attribute(
            "activityType",
            AttributeValue::from_json(&json!({"name": "Charge"})),
        );
        let timer = event(2, "TimerStarted").with_attribute("timerId", AttributeValue::text("t-9"));
        let entities = group_events(vec![scheduled, timer, event(3, "WorkflowTaskScheduled")]);

        assert_eq!(entities[0].as_group().unwrap().name(), "Charge");
        assert_eq!(entities[1].as_group().unwrap().name(), "t-9");
        assert_eq!(entities[2].as_group().unwrap().name(), "WorkflowTask");
    }

    #[test]
    fn string_correlation_ids_are_accepted() {
        let entities = group_events(vec![
            event(1, "ActivityTaskScheduled"),
            event(2, "ActivityTaskStarted")
                .with_attribute("scheduledEventId", AttributeValue::text("1")),
        ]);
        assert_eq!(entities.len(), 1);
    }
}
