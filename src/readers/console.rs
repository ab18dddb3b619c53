//! # Console-line reader.
//!
//! Reads **one line** per poll and classifies it with [`MatchOptions`].
//! The read blocks until a line is available; the polling task runs it on the
//! blocking pool so the caller is never held up.
//!
//! ## Rules
//! - One trailing `\n` (and a preceding `\r`) is stripped before matching.
//! - End of input reads as an empty line, i.e. `Running` for any non-empty token.
//! - No cleanup.

use std::fmt;
use std::io::{self, BufRead};
use std::sync::Mutex;

use crate::error::WatchError;
use crate::readers::StateReader;
use crate::state::{AppState, MatchOptions};

const NAME: &str = "console";

enum Source {
    Stdin(io::Stdin),
    Buffered(Box<dyn BufRead + Send>),
}

impl Source {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        match self {
            Source::Stdin(s) => s.read_line(buf),
            Source::Buffered(r) => r.read_line(buf),
        }
    }
}

/// Reader polling standard input (or any [`BufRead`] source) line by line.
///
/// ## Example
/// ```rust
/// use std::io::Cursor;
/// use exitwatch::{AppState, ConsoleReader, MatchOptions, StateReader};
///
/// let r = ConsoleReader::from_reader(Cursor::new("hello\nexit\n"), MatchOptions::default());
/// assert_eq!(r.read().unwrap(), AppState::Running);
/// assert_eq!(r.read().unwrap(), AppState::Exit);
/// ```
pub struct ConsoleReader {
    source: Mutex<Source>,
    options: MatchOptions,
}

impl ConsoleReader {
    /// Reader over the process's standard input.
    pub fn stdin(options: MatchOptions) -> Self {
        Self {
            source: Mutex::new(Source::Stdin(io::stdin())),
            options,
        }
    }

    /// Reader over an arbitrary line source.
    pub fn from_reader<R>(reader: R, options: MatchOptions) -> Self
    where
        R: BufRead + Send + 'static,
    {
        Self {
            source: Mutex::new(Source::Buffered(Box::new(reader))),
            options,
        }
    }

    /// Matching options used for every line.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    fn next_line(&self) -> Result<String, WatchError> {
        let mut source = self
            .source
            .lock()
            .map_err(|_| WatchError::read(NAME, "line source lock poisoned"))?;

        let mut line = String::new();
        source
            .read_line(&mut line)
            .map_err(|e| WatchError::read(NAME, e))?;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

impl fmt::Debug for ConsoleReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReader")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl StateReader for ConsoleReader {
    fn name(&self) -> &str {
        NAME
    }

    fn read(&self) -> Result<AppState, WatchError> {
        let line = self.next_line()?;
        Ok(self.options.classify(&line))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    #[test]
    fn reads_one_line_per_call() {
        let r = ConsoleReader::from_reader(
            Cursor::new("working\nstill working\nplease exit\n"),
            MatchOptions::default(),
        );
        assert_eq!(r.read(), Ok(AppState::Running));
        assert_eq!(r.read(), Ok(AppState::Running));
        assert_eq!(r.read(), Ok(AppState::Exit));
    }

    #[test]
    fn exact_match_ignores_line_endings() {
        let opts = MatchOptions::default().with_exact_match(true);
        let r = ConsoleReader::from_reader(Cursor::new("exit now\r\nEXIT\r\n"), opts);
        assert_eq!(r.read(), Ok(AppState::Running));
        assert_eq!(r.read(), Ok(AppState::Exit));
    }

    #[test]
    fn end_of_input_reads_as_running() {
        let r = ConsoleReader::from_reader(Cursor::new(""), MatchOptions::default());
        assert_eq!(r.read(), Ok(AppState::Running));
        assert_eq!(r.read(), Ok(AppState::Running));
    }

    #[test]
    fn io_errors_become_read_failures() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device gone"))
            }
        }

        let r = ConsoleReader::from_reader(io::BufReader::new(Broken), MatchOptions::default());
        let err = r.read().unwrap_err();
        assert_eq!(err.as_label(), "watch_read_failed");
        assert!(err.to_string().contains("device gone"));
    }

    #[test]
    fn has_no_cleanup() {
        let r = ConsoleReader::from_reader(Cursor::new(""), MatchOptions::default());
        assert_eq!(r.cleanup(), Ok(()));
    }
}
