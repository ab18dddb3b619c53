//! # Poller: the polling loop of one task.
//!
//! Drives one [`StateReader`](crate::StateReader) on a fixed interval until it reports
//! [`AppState::Exit`] or the task's token is cancelled, then runs cleanup.
//!
//! ## Event flow
//! ```text
//! WatchStarting
//!   loop {
//!     sleep(interval) ──(cancelled)──► CancelRequested ─┐
//!     read()  ──Err──► WatchFailed, return               │
//!     PollCompleted{poll, state}                         │
//!     Exit? ──► ExitObserved ────────────────────────────┤
//!   }                                                    ▼
//!   CleanupStarting → cleanup() ──Err──► WatchFailed, return
//!   CleanupFinished → WatchStopped
//! ```
//!
//! ## Rules
//! - Polls run **sequentially**: read N returns before delay N+1 starts.
//! - Reads and cleanup run on the blocking pool; a blocked read never stalls the runtime.
//! - Cancellation is observed at the **delay** only; an in-flight read is awaited.
//! - Cleanup runs **at most once**, after the last read has returned, and never after a read failure.
//! - A reader panic is `Panicked`; a cleanup panic is `CleanupFailed`, since cleanup already ran.
//! - Emitting waits while the task's event queue is full; no event is dropped.

use std::{sync::Arc, time::Duration};

use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::handle::{StopReason, WatchReport},
    error::WatchError,
    events::{Event, EventKind, EventSink},
    readers::ReaderRef,
    state::AppState,
    subscribers::panic_message,
};

/// Runs the polling loop for a single reader.
pub(crate) struct Poller {
    reader: ReaderRef,
    interval: Duration,
    events: EventSink,
}

impl Poller {
    pub(crate) fn new(reader: ReaderRef, interval: Duration, events: EventSink) -> Self {
        Self {
            reader,
            interval,
            events,
        }
    }

    /// Runs until exit, cancellation or failure; returns the final report.
    ///
    /// Consumes the poller, so its event sink closes once the terminal event is queued.
    pub(crate) async fn run(self, token: CancellationToken) -> Result<WatchReport, WatchError> {
        self.emit(EventKind::WatchStarting, |e| e.with_interval(self.interval))
            .await;

        let mut polls: u64 = 0;
        let reason = loop {
            if token.is_cancelled() {
                self.emit(EventKind::CancelRequested, |e| e.with_poll(polls))
                    .await;
                break StopReason::Cancelled;
            }

            let sleep = time::sleep(self.interval);
            tokio::pin!(sleep);
            let cancelled = select! {
                _ = &mut sleep => false,
                _ = token.cancelled() => true,
            };
            if cancelled {
                self.emit(EventKind::CancelRequested, |e| e.with_poll(polls))
                    .await;
                break StopReason::Cancelled;
            }

            polls += 1;
            let state = match self.read().await {
                Ok(state) => state,
                Err(e) => return Err(self.fail(polls, e).await),
            };
            self.emit(EventKind::PollCompleted, |e| {
                e.with_poll(polls).with_state(state)
            })
            .await;

            if state.is_exit() {
                self.emit(EventKind::ExitObserved, |e| e.with_poll(polls))
                    .await;
                break StopReason::ExitObserved;
            }
        };

        self.emit(EventKind::CleanupStarting, |e| e).await;
        if let Err(e) = self.cleanup().await {
            return Err(self.fail(polls, e).await);
        }
        self.emit(EventKind::CleanupFinished, |e| e).await;

        self.emit(EventKind::WatchStopped, |e| e.with_poll(polls))
            .await;
        Ok(WatchReport { polls, reason })
    }

    async fn read(&self) -> Result<AppState, WatchError> {
        let reader = Arc::clone(&self.reader);
        match task::spawn_blocking(move || reader.read()).await {
            Ok(res) => res,
            Err(join) => Err(WatchError::Panicked {
                reader: self.reader.name().to_string(),
                error: join_message(join),
            }),
        }
    }

    /// A panicking cleanup has already started its work, so it is reported as
    /// a cleanup failure rather than a broken loop.
    async fn cleanup(&self) -> Result<(), WatchError> {
        let reader = Arc::clone(&self.reader);
        match task::spawn_blocking(move || reader.cleanup()).await {
            Ok(res) => res,
            Err(join) => Err(WatchError::cleanup(
                self.reader.name(),
                format!("panicked: {}", join_message(join)),
            )),
        }
    }

    async fn fail(&self, polls: u64, err: WatchError) -> WatchError {
        let reason = err.to_string();
        self.emit(EventKind::WatchFailed, |e| {
            e.with_poll(polls).with_reason(reason)
        })
        .await;
        err
    }

    async fn emit(&self, kind: EventKind, fill: impl FnOnce(Event) -> Event) {
        let ev = Event::new(kind).with_reader(self.reader.name());
        self.events.emit(fill(ev)).await;
    }
}

fn join_message(join: task::JoinError) -> String {
    if join.is_panic() {
        panic_message(&*join.into_panic())
    } else {
        "blocking job cancelled".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::readers::ReaderFn;

    const TICK: Duration = Duration::from_millis(5);

    fn drain(rx: &mut tokio::sync::mpsc::Receiver<Event>) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        kinds
    }

    #[tokio::test]
    async fn exit_on_third_poll_then_cleanup() {
        let reads = Arc::new(AtomicUsize::new(0));
        let cleanups = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&reads);
        let c = Arc::clone(&cleanups);
        let reader = ReaderFn::new("counter", move || {
            let n = r.fetch_add(1, Ordering::SeqCst) + 1;
            Ok::<_, WatchError>(if n == 3 { AppState::Exit } else { AppState::Running })
        })
        .with_cleanup(move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let (events, mut rx) = EventSink::channel(64);
        let report = Poller::new(Arc::new(reader), TICK, events)
            .run(CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.polls, 3);
        assert_eq!(report.reason, StopReason::ExitObserved);
        assert_eq!(reads.load(Ordering::SeqCst), 3);
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);

        assert_eq!(
            drain(&mut rx),
            vec![
                EventKind::WatchStarting,
                EventKind::PollCompleted,
                EventKind::PollCompleted,
                EventKind::PollCompleted,
                EventKind::ExitObserved,
                EventKind::CleanupStarting,
                EventKind::CleanupFinished,
                EventKind::WatchStopped,
            ]
        );
    }

    #[tokio::test]
    async fn read_failure_skips_cleanup() {
        let cleaned = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&cleaned);
        let reader = ReaderFn::new("broken", || {
            Err::<AppState, _>(WatchError::read("broken", "disk on fire"))
        })
        .with_cleanup(move || {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let (events, mut rx) = EventSink::channel(64);
        let err = Poller::new(Arc::new(reader), TICK, events)
            .run(CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, WatchError::read("broken", "disk on fire"));
        assert_eq!(cleaned.load(Ordering::SeqCst), 0);
        assert_eq!(
            drain(&mut rx),
            vec![EventKind::WatchStarting, EventKind::WatchFailed]
        );
    }

    #[tokio::test]
    async fn cleanup_failure_is_terminal() {
        let reader = ReaderFn::new("stuck", || Ok::<_, WatchError>(AppState::Exit))
            .with_cleanup(|| Err(WatchError::cleanup("stuck", "busy")));

        let err = Poller::new(Arc::new(reader), TICK, EventSink::discard())
            .run(CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "watch_cleanup_failed");
    }

    #[tokio::test]
    async fn cleanup_panic_is_a_cleanup_failure() {
        let cleanups = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&cleanups);
        let reader = ReaderFn::new("fragile", || Ok::<_, WatchError>(AppState::Exit))
            .with_cleanup(move || {
                c.fetch_add(1, Ordering::SeqCst);
                panic!("cleanup blew up")
            });

        let (events, mut rx) = EventSink::channel(64);
        let err = Poller::new(Arc::new(reader), TICK, events)
            .run(CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WatchError::cleanup("fragile", "panicked: cleanup blew up")
        );
        assert!(!err.is_poll_failure());
        assert_eq!(cleanups.load(Ordering::SeqCst), 1);
        assert_eq!(
            drain(&mut rx),
            vec![
                EventKind::WatchStarting,
                EventKind::PollCompleted,
                EventKind::ExitObserved,
                EventKind::CleanupStarting,
                EventKind::WatchFailed,
            ]
        );
    }

    #[tokio::test]
    async fn reader_panic_becomes_error() {
        let reader = ReaderFn::new("panicky", || -> Result<AppState, WatchError> {
            panic!("reader exploded")
        });

        let err = Poller::new(Arc::new(reader), TICK, EventSink::discard())
            .run(CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            WatchError::Panicked {
                reader: "panicky".into(),
                error: "reader exploded".into(),
            }
        );
    }

    #[tokio::test]
    async fn cancellation_interrupts_the_delay_and_still_cleans_up() {
        let cleaned = Arc::new(Mutex::new(false));
        let c = Arc::clone(&cleaned);
        let reader = ReaderFn::new("idle", || Ok::<_, WatchError>(AppState::Running))
            .with_cleanup(move || {
                *c.lock().unwrap() = true;
                Ok(())
            });

        let token = CancellationToken::new();
        let poller = Poller::new(Arc::new(reader), Duration::from_secs(3600), EventSink::discard());
        let run = tokio::spawn(poller.run(token.clone()));

        token.cancel();
        let report = run.await.unwrap().unwrap();

        assert_eq!(report.polls, 0);
        assert_eq!(report.reason, StopReason::Cancelled);
        assert!(*cleaned.lock().unwrap());
    }
}
