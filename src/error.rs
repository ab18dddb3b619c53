//! Error types used by the polling task and its readers.
//!
//! [`WatchError`] covers every way a watch can fail: bad construction, a reader
//! that could not read or panicked, or a cleanup that failed or panicked. It provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.
//!
//! The type is `Clone` so that every observer of a task's completion receives
//! the same outcome.

use std::io;
use std::path::Path;

use thiserror::Error;

/// # Errors produced by a watch.
///
/// - `InvalidArgument` is raised synchronously while building a task.
/// - `ReadFailed` and `Panicked` end the polling loop; cleanup is **not** run.
/// - `CleanupFailed` is raised after the loop has already stopped and cleanup
///   was attempted, including when the cleanup panicked.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchError {
    /// A required construction argument was missing.
    #[error("invalid argument: {what}")]
    InvalidArgument {
        /// Which argument was missing or invalid.
        what: &'static str,
    },

    /// The reader failed while performing one poll.
    #[error("reader {reader:?} failed: {error}")]
    ReadFailed {
        /// Name of the reader.
        reader: String,
        /// The underlying error message.
        error: String,
    },

    /// The cleanup action failed or panicked after the loop stopped.
    #[error("cleanup of {reader:?} failed: {error}")]
    CleanupFailed {
        /// Name of the reader owning the cleanup.
        reader: String,
        /// The underlying error message.
        error: String,
    },

    /// The reader panicked during a poll. Also returned when the watch's
    /// background task itself is lost, e.g. because the runtime shut down.
    #[error("reader {reader:?} panicked: {error}")]
    Panicked {
        /// Name of the reader.
        reader: String,
        /// Panic payload or join error.
        error: String,
    },
}

impl WatchError {
    /// Builds a [`WatchError::ReadFailed`] from any displayable error.
    pub fn read(reader: impl Into<String>, error: impl ToString) -> Self {
        WatchError::ReadFailed {
            reader: reader.into(),
            error: error.to_string(),
        }
    }

    /// Builds a [`WatchError::CleanupFailed`] from any displayable error.
    pub fn cleanup(reader: impl Into<String>, error: impl ToString) -> Self {
        WatchError::CleanupFailed {
            reader: reader.into(),
            error: error.to_string(),
        }
    }

    pub(crate) fn read_io(reader: &str, path: &Path, err: io::Error) -> Self {
        Self::read(reader, format!("{}: {err}", path.display()))
    }

    pub(crate) fn cleanup_io(reader: &str, path: &Path, err: io::Error) -> Self {
        Self::cleanup(reader, format!("{}: {err}", path.display()))
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use exitwatch::WatchError;
    ///
    /// let err = WatchError::read("console", "broken pipe");
    /// assert_eq!(err.as_label(), "watch_read_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WatchError::InvalidArgument { .. } => "watch_invalid_argument",
            WatchError::ReadFailed { .. } => "watch_read_failed",
            WatchError::CleanupFailed { .. } => "watch_cleanup_failed",
            WatchError::Panicked { .. } => "watch_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WatchError::InvalidArgument { what } => format!("invalid argument: {what}"),
            WatchError::ReadFailed { error, .. } => format!("read: {error}"),
            WatchError::CleanupFailed { error, .. } => format!("cleanup: {error}"),
            WatchError::Panicked { error, .. } => format!("panic: {error}"),
        }
    }

    /// True when the polling loop itself broke, so cleanup was never attempted.
    ///
    /// # Example
    /// ```
    /// use exitwatch::WatchError;
    ///
    /// assert!(WatchError::read("file", "gone").is_poll_failure());
    /// assert!(!WatchError::cleanup("file", "busy").is_poll_failure());
    /// ```
    pub fn is_poll_failure(&self) -> bool {
        matches!(
            self,
            WatchError::ReadFailed { .. } | WatchError::Panicked { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let all = [
            (
                WatchError::InvalidArgument { what: "reader" },
                "watch_invalid_argument",
            ),
            (WatchError::read("r", "x"), "watch_read_failed"),
            (WatchError::cleanup("r", "x"), "watch_cleanup_failed"),
            (
                WatchError::Panicked {
                    reader: "r".into(),
                    error: "x".into(),
                },
                "watch_panicked",
            ),
        ];
        for (err, label) in all {
            assert_eq!(err.as_label(), label);
        }
    }

    #[test]
    fn io_errors_carry_the_path() {
        let err = WatchError::read_io(
            "sentinel",
            Path::new("/tmp/state.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/state.txt"));
        assert!(err.as_message().starts_with("read: "));
    }
}
