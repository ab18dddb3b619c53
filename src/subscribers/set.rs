//! # Per-task subscriber set.
//!
//! A [`SubscriberSet`] belongs to exactly one polling task. The task's
//! dispatcher hands it every event, in emission order, and waits until each
//! subscriber has handled the event before moving to the next one.
//!
//! ```text
//! event N ──► sub 1 ──► sub 2 ──► ... ──► sub K
//!                 └─ panic ─► SubscriberPanicked ──► sub 1 ..= sub K
//! event N+1 ──► ...
//! ```
//!
//! ## Rules
//! - Every subscriber sees every event of its task, in the same order.
//! - A panicking subscriber is isolated: the others still get the event, and a
//!   `SubscriberPanicked` event follows it. A panic while handling that report
//!   is not reported again.
//! - A slow subscriber delays delivery; once the task's event queue is full it
//!   also delays the poll loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Subscribers of one polling task.
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set; subscribers are called in the given order.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Hands `event` to every subscriber, then reports any panic it caused.
    pub async fn deliver(&self, event: &Event) {
        let mut panics = Vec::new();
        for sub in &self.subs {
            if let Some(info) = call(sub.as_ref(), event).await {
                panics.push(Event::subscriber_panicked(sub.name(), info));
            }
        }

        for report in &panics {
            for sub in &self.subs {
                let _ = call(sub.as_ref(), report).await;
            }
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }
}

/// Returns the panic text if the subscriber panicked.
async fn call(sub: &dyn Subscribe, event: &Event) -> Option<String> {
    AssertUnwindSafe(sub.on_event(event))
        .catch_unwind()
        .await
        .err()
        .map(|payload| panic_message(&*payload))
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
