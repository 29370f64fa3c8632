//! Error types for chatsnip
//!
//! The library surfaces a single failure: a history whose minimal window
//! still exceeds the token budget. Retrying is pointless (the fit is
//! deterministic), so callers report it and let the user shorten input.

use thiserror::Error;

/// Errors raised while fitting a prompt window
#[derive(Error, Debug)]
pub enum ChatError {
    /// The anchor turn plus the latest exchange cannot fit the budget
    #[error("prompt too long: {estimated} estimated tokens exceeds the {max} token budget with no more history to drop")]
    PromptTooLong { estimated: usize, max: usize },
}

/// Result type alias for window operations
pub type Result<T> = std::result::Result<T, ChatError>;
