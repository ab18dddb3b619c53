//! # State readers.
//!
//! This module provides the reader side of a watch:
//! - [`StateReader`] - trait for one blocking read per poll plus an optional cleanup
//! - [`ReaderRef`] - shared reference to a reader (`Arc<dyn StateReader>`)
//! - [`ConsoleReader`] - one line of standard input per poll
//! - [`SentinelFileReader`] - full content of a file, self-created and deleted on exit
//! - [`ReaderFn`] - closure-backed reader with an optional cleanup closure

mod console;
mod reader;
mod reader_fn;
mod sentinel;

pub use console::ConsoleReader;
pub use reader::{ReaderRef, StateReader};
pub use reader_fn::ReaderFn;
pub use sentinel::SentinelFileReader;
