//! Configuration for the shingle filter.
//!
//! Options use the same names as analysis settings so a settings object can
//! be deserialized straight into a [`ShingleConfig`]. Missing options fall
//! back to their defaults.
//!
//! # Examples
//!
//! ```
//! use shingler::analysis::token_filter::shingle::ShingleConfig;
//!
//! let config = ShingleConfig::from_json(
//!     r#"{ "max_shingle_size": 3, "output_unigrams": false, "token_separator": "_" }"#,
//! ).unwrap();
//!
//! assert_eq!(config.min_shingle_size(), 2);
//! assert_eq!(config.max_shingle_size(), 3);
//! assert!(!config.output_unigrams());
//! assert_eq!(config.token_separator(), "_");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShinglerError};

/// Default minimum shingle size.
pub const DEFAULT_MIN_SHINGLE_SIZE: usize = 2;

/// Default maximum shingle size.
pub const DEFAULT_MAX_SHINGLE_SIZE: usize = 2;

/// Default string placed between the tokens of a shingle.
pub const DEFAULT_TOKEN_SEPARATOR: &str = " ";

/// Default filter instance name.
pub const DEFAULT_FILTER_NAME: &str = "shingle";

/// Shape of the shingles produced by a [`ShingleFilter`](super::ShingleFilter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShingleConfig {
    /// Instance name, used for diagnostics only
    name: String,
    /// Smallest multi-token shingle (>= 2)
    min_shingle_size: usize,
    /// Largest shingle (>= min_shingle_size)
    max_shingle_size: usize,
    /// Emit single tokens alongside shingles
    output_unigrams: bool,
    /// Emit single tokens when the stream yields no shingle at all
    output_unigrams_if_no_shingles: bool,
    /// Inserted between component tokens
    token_separator: String,
}

impl Default for ShingleConfig {
    fn default() -> Self {
        ShingleConfig {
            name: DEFAULT_FILTER_NAME.to_string(),
            min_shingle_size: DEFAULT_MIN_SHINGLE_SIZE,
            max_shingle_size: DEFAULT_MAX_SHINGLE_SIZE,
            output_unigrams: true,
            output_unigrams_if_no_shingles: false,
            token_separator: DEFAULT_TOKEN_SEPARATOR.to_string(),
        }
    }
}

impl ShingleConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from a JSON settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ShingleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Set the instance name.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set the minimum shingle size.
    pub fn with_min_shingle_size(mut self, size: usize) -> Self {
        self.min_shingle_size = size;
        self
    }

    /// Set the maximum shingle size.
    pub fn with_max_shingle_size(mut self, size: usize) -> Self {
        self.max_shingle_size = size;
        self
    }

    /// Set whether unigrams are emitted alongside shingles.
    pub fn with_output_unigrams(mut self, output: bool) -> Self {
        self.output_unigrams = output;
        self
    }

    /// Set whether unigrams are emitted when no shingle could be formed.
    pub fn with_output_unigrams_if_no_shingles(mut self, output: bool) -> Self {
        self.output_unigrams_if_no_shingles = output;
        self
    }

    /// Set the separator placed between component tokens.
    pub fn with_token_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.token_separator = separator.into();
        self
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum shingle size.
    pub fn min_shingle_size(&self) -> usize {
        self.min_shingle_size
    }

    /// Maximum shingle size.
    pub fn max_shingle_size(&self) -> usize {
        self.max_shingle_size
    }

    /// Whether unigrams are emitted alongside shingles.
    pub fn output_unigrams(&self) -> bool {
        self.output_unigrams
    }

    /// Whether unigrams are emitted when no shingle could be formed.
    pub fn output_unigrams_if_no_shingles(&self) -> bool {
        self.output_unigrams_if_no_shingles
    }

    /// Separator placed between component tokens.
    pub fn token_separator(&self) -> &str {
        &self.token_separator
    }

    /// Check the size invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ShinglerError::InvalidConfig`] if:
    /// - `min_shingle_size` is less than 2
    /// - `max_shingle_size` is less than `min_shingle_size`
    pub fn validate(&self) -> Result<()> {
        if self.min_shingle_size < 2 {
            return Err(ShinglerError::invalid_config(format!(
                "[{}] min_shingle_size must be >= 2, got {}",
                self.name, self.min_shingle_size
            )));
        }
        if self.max_shingle_size < self.min_shingle_size {
            return Err(ShinglerError::invalid_config(format!(
                "[{}] max_shingle_size ({}) must be >= min_shingle_size ({})",
                self.name, self.max_shingle_size, self.min_shingle_size
            )));
        }
        Ok(())
    }
}
