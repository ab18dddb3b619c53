//! # Polling task: construction and spawning.
//!
//! A [`PollingTask`] bundles:
//! - the reader ([`ReaderRef`], required)
//! - the poll interval (default 1000ms)
//! - a cancellation token (optional parent)
//! - event subscribers (optional)
//!
//! A task can be created:
//! - **Explicitly** with [`PollingTask::new`] or [`PollingTask::builder`]
//! - **From config** with [`PollingTask::console`], [`PollingTask::sentinel_file`]
//!   or [`PollingTask::with_config`]
//!
//! ## Rules
//! - A builder without a reader fails in [`PollingTaskBuilder::build`], never at first poll.
//! - [`PollingTask::run`] consumes the task: one task, one watch.
//! - `run` must be called from within a Tokio runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    config::WatchConfig,
    core::{
        dispatch::dispatch,
        handle::{Phase, PhaseGuard, WatchHandle},
        poller::Poller,
    },
    error::WatchError,
    events::EventSink,
    readers::{ConsoleReader, ReaderRef, SentinelFileReader},
    subscribers::{Subscribe, SubscriberSet},
};

/// One watch session: a reader polled on a fixed interval until it reports exit.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use exitwatch::{AppState, PollingTask, ReaderFn, WatchError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), WatchError> {
/// let task = PollingTask::new(ReaderFn::arc("flag", || Ok::<_, WatchError>(AppState::Exit)))
///     .with_interval(Duration::from_millis(1));
///
/// let report = task.run().wait().await?;
/// assert_eq!(report.polls, 1);
/// # Ok(())
/// # }
/// ```
pub struct PollingTask {
    reader: ReaderRef,
    interval: Duration,
    token: CancellationToken,
    subscribers: Vec<Arc<dyn Subscribe>>,
    event_capacity: usize,
}

impl PollingTask {
    /// Creates a task with [`WatchConfig::default`] settings and no subscribers.
    pub fn new(reader: ReaderRef) -> Self {
        Self::with_config(reader, &WatchConfig::default())
    }

    /// Creates a builder; the reader must be supplied before [`build`](PollingTaskBuilder::build).
    pub fn builder() -> PollingTaskBuilder {
        PollingTaskBuilder::new()
    }

    /// Creates a task for `reader` taking interval and event capacity from `cfg`.
    pub fn with_config(reader: ReaderRef, cfg: &WatchConfig) -> Self {
        Self {
            reader,
            interval: cfg.interval,
            token: CancellationToken::new(),
            subscribers: Vec::new(),
            event_capacity: cfg.event_capacity_clamped(),
        }
    }

    /// Task watching standard input, one line per poll. No cleanup.
    pub fn console(cfg: &WatchConfig) -> Self {
        Self::with_config(Arc::new(ConsoleReader::stdin(cfg.match_options())), cfg)
    }

    /// Task watching a sentinel file; the file is created on the first poll if
    /// missing and deleted when the task completes.
    pub fn sentinel_file(path: impl Into<PathBuf>, cfg: &WatchConfig) -> Self {
        Self::with_config(
            Arc::new(SentinelFileReader::new(path, cfg.match_options())),
            cfg,
        )
    }

    /// Returns a task with a different poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Ties the task to `parent`: cancelling the parent cancels this watch.
    pub fn with_cancellation(mut self, parent: &CancellationToken) -> Self {
        self.token = parent.child_token();
        self
    }

    /// Returns a task with event subscribers attached.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Returns a task with a different event queue capacity (clamped to at least 1).
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity.max(1);
        self
    }

    /// Poll interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Name of the reader.
    pub fn reader_name(&self) -> &str {
        self.reader.name()
    }

    /// Starts the watch on the Tokio runtime and returns immediately.
    ///
    /// ### Flow
    /// 1. Create the task's event queue (only if there are subscribers)
    /// 2. Spawn a driver running the poll loop and the event dispatcher side by side
    /// 3. Once both are done (every event delivered), set the terminal phase
    /// 4. Return a [`WatchHandle`] resolving with the outcome
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn run(self) -> WatchHandle {
        let (events, delivery) = if self.subscribers.is_empty() {
            (EventSink::discard(), None)
        } else {
            let (events, rx) = EventSink::channel(self.event_capacity);
            (events, Some((rx, SubscriberSet::new(self.subscribers))))
        };

        let (phase_tx, phase_rx) = watch::channel(Phase::Idle);
        let reader_name = self.reader.name().to_string();
        let poller = Poller::new(self.reader, self.interval, events);
        let token = self.token.clone();

        let join = tokio::spawn(async move {
            let phase = PhaseGuard::running(phase_tx);
            let deliver = async move {
                if let Some((rx, set)) = delivery {
                    dispatch(rx, set).await;
                }
            };

            let (res, ()) = tokio::join!(poller.run(token), deliver);
            phase.finish(&res);
            res
        });

        WatchHandle::new(join, reader_name, self.token, phase_rx)
    }
}

/// Builder for [`PollingTask`] with fluent API.
///
/// Unlike [`PollingTask::new`], the reader is optional until [`build`](Self::build),
/// which rejects a missing reader with [`WatchError::InvalidArgument`].
#[derive(Default)]
pub struct PollingTaskBuilder {
    reader: Option<ReaderRef>,
    interval: Option<Duration>,
    parent: Option<CancellationToken>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    event_capacity: Option<usize>,
}

impl PollingTaskBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reader; required.
    pub fn with_reader(mut self, reader: ReaderRef) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Overrides the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Ties the task to a parent token.
    pub fn with_cancellation(mut self, parent: &CancellationToken) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Attaches event subscribers.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Overrides the event queue capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    /// Takes interval and event capacity from `cfg`.
    pub fn with_config(mut self, cfg: &WatchConfig) -> Self {
        self.interval = Some(cfg.interval);
        self.event_capacity = Some(cfg.event_capacity_clamped());
        self
    }

    /// Builds the task.
    ///
    /// # Errors
    /// [`WatchError::InvalidArgument`] if no reader was supplied.
    pub fn build(self) -> Result<PollingTask, WatchError> {
        let reader = self
            .reader
            .ok_or(WatchError::InvalidArgument { what: "reader" })?;

        let mut task = PollingTask::new(reader).with_subscribers(self.subscribers);
        if let Some(interval) = self.interval {
            task = task.with_interval(interval);
        }
        if let Some(parent) = &self.parent {
            task = task.with_cancellation(parent);
        }
        if let Some(capacity) = self.event_capacity {
            task = task.with_event_capacity(capacity);
        }
        Ok(task)
    }
}
