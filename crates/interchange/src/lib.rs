//! hindsight-interchange: workflow history wire types and deserialization.
//!
//! Provides typed structs for the event pages served by the orchestration
//! engine's history API (events, attribute trees, payload envelopes) and a
//! single `from_history_page()` entry point that turns a `serde_json::Value`
//! page into a [`HistoryPage`].
//!
//! Attribute values are classified once, at parse time, into
//! [`AttributeValue`] variants so downstream crates (codec, history,
//! cli) never sniff JSON shapes themselves.

pub mod deserialize;
pub mod types;
pub mod view;

pub use deserialize::{from_history_page, normalize_event_type, parse_event, InterchangeError};
pub use types::*;
pub use view::EventView;
