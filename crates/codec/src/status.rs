//! Remote conversion status tracking.
//!
//! A [`StatusCell`] is an observable value cell owned by whoever owns the
//! history view session. It is cheap to clone; clones share state.
//!
//! Each remote conversion takes a [`RequestTicket`] from [`StatusCell::begin`].
//! Only the newest ticket may publish a final status, so a superseded
//! request that resolves late can neither overwrite the status nor be
//! mistaken for the current result.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Outcome of the most recently initiated payload conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConversionStatus {
    NotRequested,
    Pending,
    Success,
    Failure,
}

impl ConversionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionStatus::NotRequested => "notRequested",
            ConversionStatus::Pending => "pending",
            ConversionStatus::Success => "success",
            ConversionStatus::Failure => "failure",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ConversionStatus::Success | ConversionStatus::Failure)
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one conversion request against a [`StatusCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Shared, observable conversion status.
#[derive(Debug, Clone)]
pub struct StatusCell {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    sender: watch::Sender<ConversionStatus>,
    /// Generation of the newest request. Held while publishing so the
    /// staleness check and the write are atomic.
    generation: Mutex<u64>,
}

impl StatusCell {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ConversionStatus::NotRequested);
        StatusCell {
            inner: Arc::new(Inner {
                sender,
                generation: Mutex::new(0),
            }),
        }
    }

    /// Current status.
    pub fn get(&self) -> ConversionStatus {
        *self.inner.sender.borrow()
    }

    /// Observe status changes.
    pub fn subscribe(&self) -> watch::Receiver<ConversionStatus> {
        self.inner.sender.subscribe()
    }

    /// Start a conversion: supersede every outstanding request and publish
    /// `Pending`.
    pub fn begin(&self) -> RequestTicket {
        let mut generation = self.lock();
        *generation += 1;
        self.publish(ConversionStatus::Pending);
        RequestTicket(*generation)
    }

    /// Publish the final status of `ticket`'s request.
    ///
    /// Returns `false` (and publishes nothing) when a newer request or a
    /// reset has superseded it.
    pub fn finish(&self, ticket: RequestTicket, status: ConversionStatus) -> bool {
        let generation = self.lock();
        if *generation != ticket.0 {
            tracing::debug!(
                ticket = ticket.0,
                current = *generation,
                %status,
                "ignoring stale conversion completion"
            );
            return false;
        }
        self.publish(status);
        true
    }

    /// Record that no remote conversion was requested. Supersedes any
    /// outstanding request.
    pub fn mark_not_requested(&self) -> RequestTicket {
        let mut generation = self.lock();
        *generation += 1;
        self.publish(ConversionStatus::NotRequested);
        RequestTicket(*generation)
    }

    /// Return to `NotRequested` between conversion attempts (and between
    /// tests). In-flight requests become stale.
    pub fn reset(&self) {
        let _ = self.mark_not_requested();
    }

    /// Whether `ticket` is still the newest request. Results of
    /// non-current tickets should be discarded by the caller.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        *self.lock() == ticket.0
    }

    fn publish(&self, status: ConversionStatus) {
        let previous = self.inner.sender.send_replace(status);
        if previous != status {
            tracing::debug!(from = %previous, to = %status, "conversion status changed");
        }
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        self.inner
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        StatusCell::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_requested() {
        assert_eq!(StatusCell::new().get(), ConversionStatus::NotRequested);
    }

    #[test]
    fn begin_then_finish() {
        let cell = StatusCell::new();
        let ticket = cell.begin();
        assert_eq!(cell.get(), ConversionStatus::Pending);
        assert!(cell.is_current(ticket));
        assert!(cell.finish(ticket, ConversionStatus::Success));
        assert_eq!(cell.get(), ConversionStatus::Success);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let cell = StatusCell::new();
        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.finish(second, ConversionStatus::Success));
        assert!(!cell.finish(first, ConversionStatus::Failure));
        assert_eq!(cell.get(), ConversionStatus::Success);
        assert!(!cell.is_current(first));
    }

    #[test]
    fn reset_supersedes_in_flight_requests() {
        let cell = StatusCell::new();
        let ticket = cell.begin();
        cell.reset();
        assert_eq!(cell.get(), ConversionStatus::NotRequested);
        assert!(!cell.finish(ticket, ConversionStatus::Success));
        assert_eq!(cell.get(), ConversionStatus::NotRequested);
    }

    #[test]
    fn clones_share_state() {
        let cell = StatusCell::new();
        let view = cell.clone();
        let ticket = cell.begin();
        assert_eq!(view.get(), ConversionStatus::Pending);
        view.finish(ticket, ConversionStatus::Failure);
        assert_eq!(cell.get(), ConversionStatus::Failure);
    }

    #[test]
    fn subscribers_see_updates() {
        let cell = StatusCell::new();
        let mut rx = cell.subscribe();
        assert!(!rx.has_changed().unwrap());

        let ticket = cell.begin();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ConversionStatus::Pending);

        cell.finish(ticket, ConversionStatus::Success);
        assert_eq!(*rx.borrow_and_update(), ConversionStatus::Success);
    }

    #[test]
    fn status_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(ConversionStatus::NotRequested).unwrap(),
            "notRequested"
        );
        assert_eq!(ConversionStatus::Failure.to_string(), "failure");
    }
}
