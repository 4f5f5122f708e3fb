//! # Shingler
//!
//! A streaming shingle (token n-gram) filter for full-text analysis
//! pipelines.
//!
//! ## Features
//!
//! - Configurable shingle size range and token separator
//! - Optional unigram output, with a fallback for streams too short to shingle
//! - Position-gap awareness: no shingle spans tokens removed upstream
//! - Exact offsets and position increments for highlighting and phrase scoring
//! - Lazy, pull-based iteration with upstream errors passed through

pub mod analysis;
pub mod error;

pub mod prelude {
    pub use crate::analysis::token::{Token, TokenStream, TokenType};
    pub use crate::analysis::token_filter::Filter;
    pub use crate::analysis::token_filter::shingle::{ShingleConfig, ShingleFilter, ShingleStream};
    pub use crate::error::ShinglerError;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
