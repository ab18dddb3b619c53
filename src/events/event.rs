//! # Events emitted by a polling task.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: watch start, each poll, exit, cancellation, cleanup, stop
//! - **Failure events**: reader/cleanup failure
//! - **Subscriber events**: a subscriber panicked while handling an event
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use exitwatch::{AppState, Event, EventKind};
//!
//! let ev = Event::new(EventKind::PollCompleted)
//!     .with_reader("console")
//!     .with_poll(3)
//!     .with_state(AppState::Running);
//!
//! assert_eq!(ev.kind, EventKind::PollCompleted);
//! assert_eq!(ev.poll, Some(3));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::state::AppState;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of watch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing. Delivered to every
    /// subscriber of the task right after the event that caused it.
    ///
    /// Sets: `reader` (subscriber name), `reason` (panic info)
    SubscriberPanicked,

    // === Watch lifecycle ===
    /// The background loop started.
    ///
    /// Sets: `reader`, `interval_ms`
    WatchStarting,

    /// One poll returned a state.
    ///
    /// Sets: `reader`, `poll` (1-based), `state`
    PollCompleted,

    /// The reader reported `Exit`; the loop is leaving.
    ///
    /// Sets: `reader`, `poll`
    ExitObserved,

    /// Cancellation was observed during the delay step.
    ///
    /// Sets: `reader`, `poll` (polls completed so far)
    CancelRequested,

    /// Cleanup is about to run.
    ///
    /// Sets: `reader`
    CleanupStarting,

    /// Cleanup returned successfully.
    ///
    /// Sets: `reader`
    CleanupFinished,

    /// The watch completed successfully.
    ///
    /// Sets: `reader`, `poll` (total polls)
    WatchStopped,

    // === Failures ===
    /// The watch ended with an error (read, cleanup or panic).
    ///
    /// Sets: `reader`, `poll`, `reason`
    WatchFailed,
}

/// Watch event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the reader (or subscriber, for subscriber events).
    pub reader: Option<Arc<str>>,
    /// Poll number (starting from 1).
    pub poll: Option<u64>,
    /// State observed by the poll.
    pub state: Option<AppState>,
    /// Poll interval in milliseconds (compact).
    pub interval_ms: Option<u32>,
    /// Human-readable reason (error or panic text).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            reader: None,
            poll: None,
            state: None,
            interval_ms: None,
            reason: None,
        }
    }

    /// Attaches a reader name.
    #[inline]
    pub fn with_reader(mut self, reader: impl Into<Arc<str>>) -> Self {
        self.reader = Some(reader.into());
        self
    }

    /// Attaches a poll number.
    #[inline]
    pub fn with_poll(mut self, n: u64) -> Self {
        self.poll = Some(n);
        self
    }

    /// Attaches the observed state.
    #[inline]
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches the poll interval (stored as milliseconds).
    #[inline]
    pub fn with_interval(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.interval_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reader(subscriber)
            .with_reason(info)
    }

    /// True for events about subscribers rather than the watch itself.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        self.kind == EventKind::SubscriberPanicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::WatchStarting);
        let b = Event::new(EventKind::WatchStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn interval_is_clamped_to_u32() {
        let ev = Event::new(EventKind::WatchStarting).with_interval(Duration::from_secs(u64::MAX));
        assert_eq!(ev.interval_ms, Some(u32::MAX));
    }

    #[test]
    fn subscriber_events_are_flagged() {
        assert!(Event::subscriber_panicked("audit", "boom".into()).is_subscriber_event());
        assert!(!Event::new(EventKind::ExitObserved).is_subscriber_event());
    }
}
