//! # Event subscribers for a polling task.
//!
//! This module provides the [`Subscribe`] trait and the per-task
//! [`SubscriberSet`] that calls subscribers with the task's events.
//!
//! ## Architecture
//! ```text
//! poll loop ── emit(Event) ──► event queue ──► dispatcher ──► SubscriberSet
//!                                                                │
//!                                                  ┌─────────────┼─────────────┐
//!                                                  ▼             ▼             ▼
//!                                              LogWriter      Metrics        Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use exitwatch::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct ShutdownAudit;
//!
//! #[async_trait]
//! impl Subscribe for ShutdownAudit {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::ExitObserved {
//!             // record who stopped the process
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub(crate) use set::panic_message;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
