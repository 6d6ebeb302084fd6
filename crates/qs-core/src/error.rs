//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `qs-core` validation.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A configuration value is degenerate (non-positive service time,
    /// empty operating window, zero days, non-finite value, …).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `qs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
