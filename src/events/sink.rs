//! # Per-task event queue.
//!
//! [`EventSink`] is the poll loop's end of a bounded [`tokio::sync::mpsc`]
//! channel. The other end is drained by the task's dispatcher, which hands every
//! event to the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ```text
//! Poller ── emit(ev).await ──► [mpsc, capacity N] ──► dispatcher ──► subscribers
//! ```
//!
//! ## Rules
//! - **Lossless**: a full queue makes `emit` wait; events are never dropped.
//! - **Ordered**: the single producer and single consumer keep emission order.
//! - **Closed by drop**: when the poller finishes, its sink is dropped and the
//!   dispatcher sees the end of the stream.
//! - A task without subscribers gets a [`discard`](EventSink::discard) sink.

use tokio::sync::mpsc;

use super::event::Event;

#[derive(Clone, Debug)]
pub(crate) struct EventSink {
    tx: Option<mpsc::Sender<Event>>,
}

impl EventSink {
    /// Creates a sink and its receiving end; `capacity` is clamped to at least 1.
    pub(crate) fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops every event.
    pub(crate) fn discard() -> Self {
        Self { tx: None }
    }

    /// Queues `ev`, waiting while the queue is full.
    ///
    /// Events emitted after the receiver went away are dropped.
    pub(crate) async fn emit(&self, ev: Event) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ev).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn full_queue_waits_instead_of_dropping() {
        let (sink, mut rx) = EventSink::channel(0);

        let producer = tokio::spawn(async move {
            for kind in [
                EventKind::WatchStarting,
                EventKind::PollCompleted,
                EventKind::WatchStopped,
            ] {
                sink.emit(Event::new(kind).with_reader("r")).await;
            }
        });

        let mut kinds = Vec::new();
        while let Some(ev) = rx.recv().await {
            kinds.push(ev.kind);
        }
        producer.await.unwrap();

        assert_eq!(
            kinds,
            vec![
                EventKind::WatchStarting,
                EventKind::PollCompleted,
                EventKind::WatchStopped
            ]
        );
    }

    #[tokio::test]
    async fn discard_sink_accepts_everything() {
        let sink = EventSink::discard();
        sink.emit(Event::new(EventKind::WatchStarting)).await;
    }
}
