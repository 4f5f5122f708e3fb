//! Shingle filter implementation.
//!
//! Shingles are runs of adjacent tokens joined into a single token, e.g.
//! "please divide this" yields the bigrams "please divide" and
//! "divide this". They let phrase-like matches be scored as single terms.
//!
//! # Examples
//!
//! ```
//! use shingler::analysis::token::Token;
//! use shingler::analysis::token_filter::Filter;
//! use shingler::analysis::token_filter::shingle::{ShingleConfig, ShingleFilter};
//!
//! let filter = ShingleFilter::new(ShingleConfig::new().with_max_shingle_size(3)).unwrap();
//! let tokens = vec![
//!     Token::new("please", 0),
//!     Token::new("divide", 1),
//!     Token::new("this", 2),
//! ];
//!
//! let texts: Vec<String> = filter
//!     .filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(
//!     texts,
//!     vec!["please", "please divide", "please divide this", "divide", "divide this", "this"]
//! );
//! ```

mod config;
mod stream;
mod window;

use std::convert::Infallible;
use std::sync::Arc;

use log::debug;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

pub use config::{
    DEFAULT_FILTER_NAME, DEFAULT_MAX_SHINGLE_SIZE, DEFAULT_MIN_SHINGLE_SIZE,
    DEFAULT_TOKEN_SEPARATOR, ShingleConfig,
};
pub use stream::ShingleStream;

/// A filter that combines adjacent tokens into shingles.
///
/// The configuration is validated once, when the filter is created. Every
/// call to [`open`](ShingleFilter::open) or [`Filter::filter`] gets its own
/// window, so one filter can serve many streams, from many threads.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    config: Arc<ShingleConfig>,
}

impl ShingleFilter {
    /// Create a shingle filter from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `min_shingle_size` is less than 2
    /// - `max_shingle_size` is less than `min_shingle_size`
    pub fn new(config: ShingleConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "[{}] shingle filter configured: sizes {}..={}, output_unigrams={}, \
             output_unigrams_if_no_shingles={}, separator={:?}",
            config.name(),
            config.min_shingle_size(),
            config.max_shingle_size(),
            config.output_unigrams(),
            config.output_unigrams_if_no_shingles(),
            config.token_separator()
        );
        Ok(ShingleFilter {
            config: Arc::new(config),
        })
    }

    /// Create a shingle filter from a JSON settings object.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(ShingleConfig::from_json(json)?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ShingleConfig {
        &self.config
    }

    /// Start generating shingles from a fallible token source.
    ///
    /// Errors yielded by `source` are passed through unchanged.
    pub fn open<S, E>(&self, source: S) -> ShingleStream<S::IntoIter>
    where
        S: IntoIterator<Item = std::result::Result<Token, E>>,
    {
        ShingleStream::with_config(Arc::clone(&self.config), source.into_iter())
    }
}

impl Default for ShingleFilter {
    fn default() -> Self {
        ShingleFilter {
            config: Arc::new(ShingleConfig::default()),
        }
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stream = self.open(tokens.map(Ok::<Token, Infallible>));
        Ok(Box::new(stream.map(|result| match result {
            Ok(token) => token,
            Err(never) => match never {},
        })))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
