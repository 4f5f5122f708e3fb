//! Text analysis module for Shingler.
//!
//! Tokens arrive from an upstream tokenizer, pass through token filters,
//! and leave for indexing or query scoring.

pub mod token;
pub mod token_filter;

// Re-export commonly used types
pub use token::*;
pub use token_filter::*;
