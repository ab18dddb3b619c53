//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [watch-starting] reader="sentinel:/tmp/app.state" interval_ms=1000
//! [poll] reader="sentinel:/tmp/app.state" poll=1 state=Running
//! [exit-observed] reader="sentinel:/tmp/app.state" poll=4
//! [cleanup-starting] reader="sentinel:/tmp/app.state"
//! [cleanup-finished] reader="sentinel:/tmp/app.state"
//! [watch-stopped] reader="sentinel:/tmp/app.state" polls=4
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let reader = e.reader.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::WatchStarting => {
                println!(
                    "[watch-starting] reader={reader:?} interval_ms={:?}",
                    e.interval_ms
                );
            }
            EventKind::PollCompleted => {
                println!(
                    "[poll] reader={reader:?} poll={:?} state={:?}",
                    e.poll, e.state
                );
            }
            EventKind::ExitObserved => {
                println!("[exit-observed] reader={reader:?} poll={:?}", e.poll);
            }
            EventKind::CancelRequested => {
                println!("[cancel-requested] reader={reader:?} poll={:?}", e.poll);
            }
            EventKind::CleanupStarting => {
                println!("[cleanup-starting] reader={reader:?}");
            }
            EventKind::CleanupFinished => {
                println!("[cleanup-finished] reader={reader:?}");
            }
            EventKind::WatchStopped => {
                println!("[watch-stopped] reader={reader:?} polls={:?}", e.poll);
            }
            EventKind::WatchFailed => {
                println!(
                    "[watch-failed] reader={reader:?} poll={:?} err={:?}",
                    e.poll, e.reason
                );
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] subscriber={reader} info={}",
                    e.reason.as_deref().unwrap_or("unknown"),
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
