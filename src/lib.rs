//! # exitwatch
//!
//! **exitwatch** lets a long-running process watch for an externally signaled
//! "exit" condition (a line on standard input, or the content of a sentinel
//! file) and shut itself down cleanly, without blocking its own main work.
//!
//! It is a lightweight alternative to OS signal handling for CLIs and background
//! services that an operator or a script should be able to stop by writing
//! `exit` somewhere.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌───────────────┐   ┌────────────────────┐   ┌──────────────┐
//!   │ ConsoleReader │   │ SentinelFileReader │   │   ReaderFn   │
//!   │  (stdin line) │   │   (file content)   │   │  (closure)   │
//!   └───────┬───────┘   └─────────┬──────────┘   └──────┬───────┘
//!           └──────── classify(text, MatchOptions) ─────┘
//!                                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  PollingTask (one reader, one interval, one cancellation token)   │
//! └────────────────────────────────┬──────────────────────────────────┘
//!                                  ▼ run()
//!                     ┌──────────────────────────┐
//!                     │  Poller (tokio task)     │──► event queue ──► SubscriberSet
//!                     │  sleep → read → check    │                    (LogWriter, custom)
//!                     │  cleanup once            │
//!                     └────────────┬─────────────┘
//!                                  ▼
//!                      WatchHandle (shared completion)
//! ```
//!
//! ### Lifecycle
//! ```text
//! PollingTask::run() ──► WatchHandle (returns immediately)
//!
//! loop {
//!   ├─► sleep(interval)            (cancellable)
//!   ├─► reader.read()              (blocking pool)
//!   │       ├─ Err  ──► WatchFailed, complete with error (no cleanup)
//!   │       ├─ Running ──► continue
//!   │       └─ Exit ──► break
//! }
//! reader.cleanup()  (exactly once)
//! complete: Ok(WatchReport { polls, reason })
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                         |
//! |-------------------|--------------------------------------------------------------|--------------------------------------------|
//! | **Matching**      | Interpret raw text as Running/Exit.                          | [`classify`], [`MatchOptions`], [`AppState`] |
//! | **Readers**       | Console, sentinel file or closure sources.                   | [`StateReader`], [`ConsoleReader`], [`SentinelFileReader`], [`ReaderFn`] |
//! | **Polling**       | Background poll loop with cleanup and cancellation.          | [`PollingTask`], [`WatchHandle`]           |
//! | **Events**        | Hook into the watch lifecycle (logging, metrics).            | [`Subscribe`], [`Event`], [`EventKind`]    |
//! | **Errors**        | Typed errors for construction, reads and cleanup.            | [`WatchError`]                             |
//! | **Configuration** | Per-task settings.                                           | [`WatchConfig`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust,no_run
//! use exitwatch::{PollingTask, WatchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = WatchConfig::default();
//!
//!     // Write "exit" into app.state to stop the process.
//!     let watch = PollingTask::sentinel_file("app.state", &cfg).run();
//!
//!     while !watch.is_finished() {
//!         // main work...
//!         tokio::time::sleep(std::time::Duration::from_millis(200)).await;
//!     }
//!
//!     let report = watch.wait().await?;
//!     println!("stopped after {} polls", report.polls);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod readers;
mod state;
mod subscribers;

// ---- Public re-exports ----

pub use config::WatchConfig;
pub use crate::core::{Phase, PollingTask, PollingTaskBuilder, StopReason, WatchHandle, WatchReport};
pub use error::WatchError;
pub use events::{Event, EventKind};
pub use readers::{ConsoleReader, ReaderFn, ReaderRef, SentinelFileReader, StateReader};
pub use state::{AppState, MatchOptions, classify};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
