//! # Per-task watch configuration.
//!
//! Provides [`WatchConfig`] the settings a single polling task is built from.
//!
//! Config is used in two ways:
//! 1. **Convenience constructors**: `PollingTask::console(&cfg)`, `PollingTask::sentinel_file(path, &cfg)`
//! 2. **Matching**: `cfg.match_options()` feeds [`classify`](crate::classify)
//!
//! Every task owns its own copy; there is no process-wide interval.

use std::time::Duration;

use crate::state::MatchOptions;

/// Configuration for one polling task.
///
/// ## Field semantics
/// - `exit_token`: text that signals exit
/// - `case_insensitive`: compare after uppercasing both sides
/// - `exact_match`: equality instead of substring containment
/// - `interval`: fixed delay before every poll
/// - `event_capacity`: per-task event queue size (min 1); a full queue makes the
///   poll loop wait for subscribers, it never drops events
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// Text that signals exit.
    pub exit_token: String,
    /// Normalize case before comparing.
    pub case_insensitive: bool,
    /// Require the whole input to equal the token.
    pub exact_match: bool,
    /// Delay before every poll. Constant for the task's lifetime.
    pub interval: Duration,
    /// Capacity of the task's event queue.
    pub event_capacity: usize,
}

impl WatchConfig {
    /// Returns the matching part of the configuration.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            exit_token: self.exit_token.clone(),
            case_insensitive: self.case_insensitive,
            exact_match: self.exact_match,
        }
    }

    /// Returns the event queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn event_capacity_clamped(&self) -> usize {
        self.event_capacity.max(1)
    }
}

impl Default for WatchConfig {
    /// Default configuration:
    ///
    /// - `exit_token = "exit"`
    /// - `case_insensitive = true`
    /// - `exact_match = false`
    /// - `interval = 1000ms`
    /// - `event_capacity = 1024`
    fn default() -> Self {
        let m = MatchOptions::default();
        Self {
            exit_token: m.exit_token,
            case_insensitive: m.case_insensitive,
            exact_match: m.exact_match,
            interval: Duration::from_millis(1000),
            event_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_contract() {
        let cfg = WatchConfig::default();
        assert_eq!(cfg.interval, Duration::from_secs(1));
        assert_eq!(cfg.match_options(), MatchOptions::default());
    }

    #[test]
    fn event_capacity_never_zero() {
        let cfg = WatchConfig {
            event_capacity: 0,
            ..WatchConfig::default()
        };
        assert_eq!(cfg.event_capacity_clamped(), 1);
    }
}
