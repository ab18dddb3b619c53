//! Watch core: polling loop and lifecycle.
//!
//! The public API from this module is [`PollingTask`] (construction) and
//! [`WatchHandle`] (completion, cancellation, phase).
//!
//! Internal modules:
//! - [`poller`]: the sleep → read → check loop, followed by cleanup;
//! - [`dispatch`]: drains the task's event queue into its subscribers;
//! - [`handle`]: shared completion future and phase tracking;
//! - [`task`]: construction, validation and spawning.

mod dispatch;
mod handle;
mod poller;
mod task;

pub use handle::{Phase, StopReason, WatchHandle, WatchReport};
pub use task::{PollingTask, PollingTaskBuilder};
