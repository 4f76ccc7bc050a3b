//! Error types for the listener core.

use thiserror::Error;

/// Main error type for listener operations.
///
/// Construction is the only fallible operation in this crate; dispatch
/// itself never errors. A filtered-out event is a skipped delivery, not a
/// failure, and a panicking callback propagates to the caller uncaught.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for listener operations.
pub type Result<T> = std::result::Result<T, ListenerError>;
