use std::fmt;

/// Signal observed by a single poll.
///
/// The [`Display`](fmt::Display) form is the variant name; a sentinel file
/// created by the watcher contains exactly `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    /// The application keeps running.
    #[default]
    Running,
    /// The application should shut down.
    Exit,
}

impl AppState {
    /// Canonical text form.
    pub const fn as_str(self) -> &'static str {
        match self {
            AppState::Running => "Running",
            AppState::Exit => "Exit",
        }
    }

    /// True if the watch should stop polling and run cleanup.
    #[inline]
    pub fn is_exit(self) -> bool {
        matches!(self, AppState::Exit)
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
