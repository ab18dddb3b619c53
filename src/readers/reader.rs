//! # Reader abstraction.
//!
//! A [`StateReader`] is invoked once per poll from the blocking thread pool, so
//! it may block freely (waiting on a console line, reading a file).
//! The polling task owns scheduling; the reader owns the I/O.

use std::sync::Arc;

use crate::error::WatchError;
use crate::state::AppState;

/// # One read per poll, one cleanup per task.
///
/// # Example
/// ```
/// use exitwatch::{AppState, StateReader, WatchError};
///
/// struct Always;
///
/// impl StateReader for Always {
///     fn name(&self) -> &str { "always-exit" }
///
///     fn read(&self) -> Result<AppState, WatchError> {
///         Ok(AppState::Exit)
///     }
/// }
/// ```
pub trait StateReader: Send + Sync + 'static {
    /// Returns a stable, human-readable reader name.
    fn name(&self) -> &str;

    /// Performs one read and interprets it.
    ///
    /// Called sequentially: read N returns before read N+1 is scheduled.
    fn read(&self) -> Result<AppState, WatchError>;

    /// Releases resources after the final poll.
    ///
    /// Invoked at most once, only after the polling loop has stopped and
    /// only if it stopped without a read failure.
    fn cleanup(&self) -> Result<(), WatchError> {
        Ok(())
    }
}

/// Shared handle to a reader.
pub type ReaderRef = Arc<dyn StateReader>;
