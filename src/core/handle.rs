//! # Completion handle of a running watch.
//!
//! [`WatchHandle`] is returned by [`PollingTask::run`](crate::PollingTask::run).
//! It is cheap to clone; every clone observes the **same** outcome, and the
//! outcome is produced exactly once by the background task.
//!
//! ## Phases
//! ```text
//! Idle ──(background task scheduled)──► Running ──► Completed
//!                                           └─────► Failed
//! ```
//! The terminal phase is set before the completion future resolves. If the
//! background task dies without reporting, its phase guard still moves the
//! phase to `Failed`.

use std::future::IntoFuture;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::WatchError;

/// Lifecycle phase of a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Spawned but not yet polled by the runtime.
    Idle,
    /// Polling loop or cleanup in progress.
    Running,
    /// Finished successfully (exit observed or cancelled, cleanup done).
    Completed,
    /// Finished with an error.
    Failed,
}

impl Phase {
    /// True for [`Phase::Completed`] and [`Phase::Failed`]; a terminal phase never changes.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }
}

/// Publishes the phase of a running watch.
///
/// Dropping the guard before [`finish`](Self::finish) (e.g. while unwinding)
/// marks the watch [`Phase::Failed`], so no observer is left waiting on `Running`.
pub(crate) struct PhaseGuard {
    tx: watch::Sender<Phase>,
}

impl PhaseGuard {
    /// Moves the phase to [`Phase::Running`].
    pub(crate) fn running(tx: watch::Sender<Phase>) -> Self {
        tx.send_replace(Phase::Running);
        Self { tx }
    }

    /// Records the terminal phase matching `outcome`.
    pub(crate) fn finish<T>(self, outcome: &Result<T, WatchError>) {
        self.tx.send_replace(if outcome.is_ok() {
            Phase::Completed
        } else {
            Phase::Failed
        });
    }
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        self.tx.send_if_modified(|phase| {
            if phase.is_terminal() {
                return false;
            }
            *phase = Phase::Failed;
            true
        });
    }
}

/// Why the polling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The reader reported [`AppState::Exit`](crate::AppState::Exit).
    ExitObserved,
    /// The task's cancellation token fired during a delay.
    Cancelled,
}

/// Summary of a successful watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchReport {
    /// Number of reads performed.
    pub polls: u64,
    /// Why the loop stopped.
    pub reason: StopReason,
}

type Completion = Shared<BoxFuture<'static, Result<WatchReport, WatchError>>>;

/// Shared handle to a running watch.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use exitwatch::{AppState, PollingTask, ReaderFn, StopReason, WatchError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), WatchError> {
/// let task = PollingTask::builder()
///     .with_reader(ReaderFn::arc("now", || Ok::<_, WatchError>(AppState::Exit)))
///     .with_interval(Duration::from_millis(1))
///     .build()?;
///
/// let handle = task.run();
/// let other = handle.clone();
///
/// let report = handle.await?;
/// assert_eq!(report.reason, StopReason::ExitObserved);
/// assert_eq!(other.wait().await?, report);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WatchHandle {
    done: Completion,
    token: CancellationToken,
    phase: watch::Receiver<Phase>,
}

impl WatchHandle {
    pub(crate) fn new(
        join: tokio::task::JoinHandle<Result<WatchReport, WatchError>>,
        reader: String,
        token: CancellationToken,
        phase: watch::Receiver<Phase>,
    ) -> Self {
        let done = async move {
            match join.await {
                Ok(res) => res,
                Err(e) => Err(WatchError::Panicked {
                    reader,
                    error: e.to_string(),
                }),
            }
        }
        .boxed()
        .shared();

        Self { done, token, phase }
    }

    /// Waits for the watch to finish (after cleanup) and returns its outcome.
    pub async fn wait(&self) -> Result<WatchReport, WatchError> {
        self.done.clone().await
    }

    /// Requests cancellation. The current delay is interrupted; an in-flight
    /// read is allowed to return, then cleanup runs.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once cancellation was requested (by this handle or a parent token).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// True once the watch reached [`Phase::Completed`] or [`Phase::Failed`].
    pub fn is_finished(&self) -> bool {
        self.phase().is_terminal()
    }
}

impl IntoFuture for WatchHandle {
    type Output = Result<WatchReport, WatchError>;
    type IntoFuture = Completion;

    fn into_future(self) -> Self::IntoFuture {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(!Phase::Idle.is_terminal());
        assert!(!Phase::Running.is_terminal());
        assert!(Phase::Completed.is_terminal());
        assert!(Phase::Failed.is_terminal());
    }

    #[tokio::test]
    async fn lost_background_task_reports_panic_and_finishes() {
        let (tx, rx) = watch::channel(Phase::Idle);
        let join: tokio::task::JoinHandle<Result<WatchReport, WatchError>> =
            tokio::spawn(async move {
                let _phase = PhaseGuard::running(tx);
                panic!("driver died")
            });
        let handle = WatchHandle::new(join, "r".into(), CancellationToken::new(), rx);

        let err = handle.wait().await.unwrap_err();
        assert_eq!(err.as_label(), "watch_panicked");
        assert_eq!(handle.phase(), Phase::Failed);
        assert!(handle.is_finished());
    }

    #[test]
    fn finished_guard_keeps_its_phase() {
        let (tx, rx) = watch::channel(Phase::Idle);
        let guard = PhaseGuard::running(tx);
        assert_eq!(*rx.borrow(), Phase::Running);

        guard.finish(&Ok::<_, WatchError>(()));
        assert_eq!(*rx.borrow(), Phase::Completed);
    }
}
