//! # Sentinel-file reader.
//!
//! Watches a plain text file whose content an operator overwrites with the
//! exit token to stop the process.
//!
//! ## Lifecycle
//! ```text
//! poll: file exists?  ── yes ──► read full text ──► classify
//!                     └─ no ───► create with "Running" ──► Running
//!
//! cleanup: file exists? ── yes ──► delete
//!                       └─ no ───► nothing (not an error)
//! ```
//!
//! ## Rules
//! - The file is owned by the task for the duration of the watch.
//! - Content is classified verbatim (no trimming).
//! - No locking: exactly one sentinel task per path.
//! - A file removed between the existence check and the read is a plain read failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::WatchError;
use crate::readers::StateReader;
use crate::state::{AppState, MatchOptions};

/// Reader polling the content of a sentinel file.
#[derive(Debug, Clone)]
pub struct SentinelFileReader {
    name: String,
    path: PathBuf,
    options: MatchOptions,
}

impl SentinelFileReader {
    /// Creates a reader for `path`. Nothing is touched on disk until the first poll.
    pub fn new(path: impl Into<PathBuf>, options: MatchOptions) -> Self {
        let path = path.into();
        Self {
            name: format!("sentinel:{}", path.display()),
            path,
            options,
        }
    }

    /// Path of the watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Matching options used for the file content.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }
}

impl StateReader for SentinelFileReader {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<AppState, WatchError> {
        let exists = self
            .path
            .try_exists()
            .map_err(|e| WatchError::read_io(&self.name, &self.path, e))?;

        if exists {
            let content = fs::read_to_string(&self.path)
                .map_err(|e| WatchError::read_io(&self.name, &self.path, e))?;
            Ok(self.options.classify(&content))
        } else {
            fs::write(&self.path, AppState::Running.as_str())
                .map_err(|e| WatchError::read_io(&self.name, &self.path, e))?;
            Ok(AppState::Running)
        }
    }

    fn cleanup(&self) -> Result<(), WatchError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WatchError::cleanup_io(&self.name, &self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_read_creates_running_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        let r = SentinelFileReader::new(&path, MatchOptions::default());

        assert_eq!(r.read(), Ok(AppState::Running));
        assert_eq!(fs::read_to_string(&path).unwrap(), "Running");
    }

    #[test]
    fn exit_token_in_file_reads_as_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        let r = SentinelFileReader::new(&path, MatchOptions::default());

        assert_eq!(r.read(), Ok(AppState::Running));
        fs::write(&path, "EXIT\n").unwrap();
        assert_eq!(r.read(), Ok(AppState::Exit));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state");
        let r = SentinelFileReader::new(&path, MatchOptions::default());

        r.read().unwrap();
        assert!(path.exists());
        r.cleanup().unwrap();
        assert!(!path.exists());
        r.cleanup().unwrap();
    }

    #[test]
    fn unreadable_location_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("state");
        let r = SentinelFileReader::new(&path, MatchOptions::default());

        let err = r.read().unwrap_err();
        assert!(err.is_poll_failure());
        assert!(err.to_string().contains("missing-dir"));
    }

    #[test]
    fn name_mentions_the_path() {
        let r = SentinelFileReader::new("/var/run/app.state", MatchOptions::default());
        assert_eq!(r.name(), "sentinel:/var/run/app.state");
        assert_eq!(r.path(), Path::new("/var/run/app.state"));
    }
}
