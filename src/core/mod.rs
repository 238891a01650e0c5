//! Core error types.
//!
//! Every fallible engine operation returns [`PomError`]. Configuration loading sits
//! outside the engine and uses `anyhow` instead; [`user_friendly_error`] accepts both.

pub mod error;

pub use error::{ErrorContext, PomError, user_friendly_error};
