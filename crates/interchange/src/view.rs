//! The fixed vocabulary of event-history display modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the display modes for an event history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventView {
    Summary,
    Full,
    Compact,
    Json,
}

impl EventView {
    pub const ALL: [EventView; 4] = [
        EventView::Summary,
        EventView::Full,
        EventView::Compact,
        EventView::Json,
    ];

    /// Parse a view tag. Unknown tags yield `None` rather than an error so
    /// callers can fall back to the unversioned history root.
    pub fn parse(tag: &str) -> Option<Self> {
        EventView::ALL.into_iter().find(|view| view.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventView::Summary => "summary",
            EventView::Full => "full",
            EventView::Compact => "compact",
            EventView::Json => "json",
        }
    }
}

impl fmt::Display for EventView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
