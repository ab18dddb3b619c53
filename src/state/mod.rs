//! # Application state and its text interpretation.
//!
//! - [`AppState`] the two-valued signal produced once per poll
//! - [`MatchOptions`] how raw text is matched against the exit token
//! - [`classify`] pure mapping from text to [`AppState`]

mod app_state;
mod matcher;

pub use app_state::AppState;
pub use matcher::{MatchOptions, classify};
