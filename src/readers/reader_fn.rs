//! # Closure-backed reader (`ReaderFn`)
//!
//! [`ReaderFn`] wraps a closure `F: Fn() -> Result<AppState, WatchError>` and an
//! optional cleanup closure. If shared state is needed between polls, capture an
//! `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use exitwatch::{AppState, ReaderFn, ReaderRef, WatchError};
//!
//! let r: ReaderRef = ReaderFn::arc("flag", || Ok::<_, WatchError>(AppState::Running));
//! assert_eq!(r.name(), "flag");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::WatchError;
use crate::readers::StateReader;
use crate::state::AppState;

type CleanupFn = Box<dyn Fn() -> Result<(), WatchError> + Send + Sync>;

/// Function-backed reader implementation.
pub struct ReaderFn<F> {
    name: Cow<'static, str>,
    f: F,
    cleanup: Option<CleanupFn>,
}

impl<F> ReaderFn<F> {
    /// Creates a new function-backed reader without cleanup.
    ///
    /// Prefer [`ReaderFn::arc`] when you immediately need a [`ReaderRef`](crate::ReaderRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            cleanup: None,
        }
    }

    /// Creates the reader and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }

    /// Attaches a cleanup closure, run once after the final poll.
    pub fn with_cleanup<C>(mut self, cleanup: C) -> Self
    where
        C: Fn() -> Result<(), WatchError> + Send + Sync + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// True if a cleanup closure is attached.
    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }
}

impl<F> fmt::Debug for ReaderFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderFn")
            .field("name", &self.name)
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

impl<F> StateReader for ReaderFn<F>
where
    F: Fn() -> Result<AppState, WatchError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<AppState, WatchError> {
        (self.f)()
    }

    fn cleanup(&self) -> Result<(), WatchError> {
        match &self.cleanup {
            Some(c) => c(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn cleanup_defaults_to_noop() {
        let r = ReaderFn::new("plain", || Ok::<_, WatchError>(AppState::Exit));
        assert!(!r.has_cleanup());
        assert_eq!(r.read(), Ok(AppState::Exit));
        assert_eq!(r.cleanup(), Ok(()));
    }

    #[test]
    fn cleanup_closure_is_invoked() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let r = ReaderFn::new("counted", || Ok::<_, WatchError>(AppState::Running)).with_cleanup(move || {
            h.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(r.has_cleanup());
        r.cleanup().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
