//! Configuration error type.
//!
//! Raised before any actor starts and before any shared resource exists.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be between {min} and {max}, got {got}")]
    OutOfRange {
        name: &'static str,
        min:  i64,
        max:  i64,
        got:  i64,
    },
}

/// Shorthand result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;
