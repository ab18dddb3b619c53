//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into a
//! polling task. The task's [`SubscriberSet`](crate::SubscriberSet) calls every
//! subscriber with every event, one event at a time.
//!
//! ## Contract
//! - No event is dropped: each subscriber sees the task's full event stream,
//!   and all of it before the task's completion becomes observable.
//! - A panic inside `on_event` is caught and reported as `SubscriberPanicked`.
//! - Handlers should be quick. A slow handler holds back the other subscribers
//!   and, once the task's event queue fills up, the poll loop itself.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from the task's dispatcher. Implementations should avoid blocking the
/// async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
