//! Error types for the Shingler library.
//!
//! All errors raised by this crate are represented by the [`ShinglerError`]
//! enum. Errors produced by an upstream token source are never converted
//! into this type; a [`ShingleStream`](crate::analysis::token_filter::shingle::ShingleStream)
//! hands them back to the caller untouched.
//!
//! # Examples
//!
//! ```
//! use shingler::error::{ShinglerError, Result};
//!
//! fn check(min: usize) -> Result<()> {
//!     if min < 2 {
//!         return Err(ShinglerError::invalid_config("min_shingle_size must be >= 2"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(1).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Shingler operations.
#[derive(Error, Debug)]
pub enum ShinglerError {
    /// Invalid parameter combination, detected when a filter is configured.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors while loading settings from disk
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with ShinglerError.
pub type Result<T> = std::result::Result<T, ShinglerError>;

impl ShinglerError {
    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ShinglerError::InvalidConfig(msg.into())
    }

    /// Whether this error was caused by an invalid configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, ShinglerError::InvalidConfig(_))
    }
}
