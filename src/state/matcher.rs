//! # Exit-token matching.
//!
//! [`classify`] turns one fragment of raw text (a console line, the content of a
//! sentinel file) into an [`AppState`].
//!
//! ## Rules
//! ```text
//! case_insensitive → uppercase(input), uppercase(token)
//! exact_match      → Exit iff input == token
//! otherwise        → Exit iff input contains token
//! anything else    → Running
//! ```
//! - The same case transform is applied to both sides.
//! - An empty token in substring mode matches every input.
//! - Total: never fails, no side effects.

use std::borrow::Cow;

use super::AppState;

/// How raw text is interpreted as an [`AppState`].
///
/// ## Example
/// ```rust
/// use exitwatch::{AppState, MatchOptions};
///
/// let opts = MatchOptions::default().with_exact_match(true);
/// assert_eq!(opts.classify("EXIT"), AppState::Exit);
/// assert_eq!(opts.classify("exit now"), AppState::Running);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOptions {
    /// Text that signals exit.
    pub exit_token: String,
    /// Compare after normalizing both sides to uppercase.
    pub case_insensitive: bool,
    /// Require equality instead of substring containment.
    pub exact_match: bool,
}

impl MatchOptions {
    /// Returns options with a different exit token.
    pub fn with_exit_token(mut self, token: impl Into<String>) -> Self {
        self.exit_token = token.into();
        self
    }

    /// Returns options with updated case sensitivity.
    pub fn with_case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Returns options with updated match mode.
    pub fn with_exact_match(mut self, yes: bool) -> Self {
        self.exact_match = yes;
        self
    }

    /// Shorthand for [`classify(input, self)`](classify).
    #[inline]
    pub fn classify(&self, input: &str) -> AppState {
        classify(input, self)
    }
}

impl Default for MatchOptions {
    /// - `exit_token = "exit"`
    /// - `case_insensitive = true`
    /// - `exact_match = false`
    fn default() -> Self {
        Self {
            exit_token: "exit".to_string(),
            case_insensitive: true,
            exact_match: false,
        }
    }
}

/// Classifies `input` as [`AppState::Exit`] or [`AppState::Running`].
pub fn classify(input: &str, options: &MatchOptions) -> AppState {
    let (input, token) = normalize(input, &options.exit_token, options.case_insensitive);

    let hit = if options.exact_match {
        input == token
    } else {
        input.contains(&*token)
    };

    if hit { AppState::Exit } else { AppState::Running }
}

fn normalize<'a>(input: &'a str, token: &'a str, fold: bool) -> (Cow<'a, str>, Cow<'a, str>) {
    if fold {
        (
            Cow::Owned(input.to_uppercase()),
            Cow::Owned(token.to_uppercase()),
        )
    } else {
        (Cow::Borrowed(input), Cow::Borrowed(token))
    }
}
