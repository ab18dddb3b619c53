//! Watch events: data model and the per-task queue.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - `EventSink` the poll loop's end of the task's event queue
//!
//! ## Quick reference
//! - **Producer**: the poll loop (`core::poller`).
//! - **Consumer**: the task's dispatcher, which feeds its `SubscriberSet`.

mod event;
mod sink;

pub use event::{Event, EventKind};
pub(crate) use sink::EventSink;
