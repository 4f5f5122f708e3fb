//! Token filter implementations for token transformation.
//!
//! Filters receive a stream of tokens produced upstream (by a tokenizer or
//! by earlier filters) and produce a new stream.
//!
//! # Available Filters
//!
//! - [`shingle::ShingleFilter`] - Joins adjacent tokens into shingles
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Shingle → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so that one configured filter can be
/// shared by concurrent analysis runs.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use shingler::analysis::token::TokenStream;
/// use shingler::analysis::token_filter::Filter;
/// use shingler::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|mut t| {
///             t.text = t.text.chars().rev().collect();
///             t
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod shingle;

pub use shingle::{ShingleConfig, ShingleFilter, ShingleStream};
