//! # Event dispatcher of one task.
//!
//! Drains the task's event queue into its [`SubscriberSet`].
//!
//! ## Rules
//! - The queue is created before the poll loop starts, so no event is missed.
//! - The dispatcher ends when the poller drops its sink, i.e. after the
//!   terminal event (`WatchStopped` / `WatchFailed`) has been delivered.
//! - It runs alongside the poller inside the task's driver, so the watch only
//!   completes once every event has reached every subscriber.

use tokio::sync::mpsc;

use crate::events::Event;
use crate::subscribers::SubscriberSet;

pub(crate) async fn dispatch(mut rx: mpsc::Receiver<Event>, set: SubscriberSet) {
    while let Some(ev) = rx.recv().await {
        set.deliver(&ev).await;
    }
}
