//! Workflow history folding and summarization.
//!
//! Takes decoded events (see `hindsight-codec`) and produces what every
//! history view renders from:
//! - [`grouping`]: folds the flat event stream into lifecycle groups
//! - [`selector`]: picks the one attribute that summarizes an event/group
//! - [`display`]: per-attribute display decisions (plain text, links,
//!   code blocks)
//! - [`render`]: the text and json views

pub mod display;
pub mod grouping;
pub mod render;
pub mod selector;

pub use display::{
    code_block_value, should_display_as_plain_text, should_display_nested_attribute,
    workers_link_key, workflow_link_key, CodeBlockValue,
};
pub use grouping::{
    classify, flatten, group_events, EventFamily, EventGroup, EventGrouper, EventRole,
    HistoryEntity, HistoryItem, Lifecycle, LIFECYCLES,
};
pub use render::{entity_line, entity_to_json, render_json, render_view};
pub use selector::{
    should_display_attribute, single_attribute_for_event, summary_attribute, SummaryAttribute,
    SummaryValue, PREFERRED_SUMMARY_KEYS,
};
