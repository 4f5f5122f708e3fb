//! Token types and utilities for text analysis.
//!
//! This module defines the core data structures for representing text tokens,
//! which are the units that flow into and out of the shingle filter.
//!
//! # Core Types
//!
//! - [`Token`] - A single token with text, offsets, and position metadata
//! - [`TokenType`] - Classification of token content (word, shingle, etc.)
//! - [`TokenStream`] - Type alias for boxed iterator of tokens
//!
//! # Position Increments
//!
//! Tokens describe their position relative to the previous token through
//! `position_increment`:
//!
//! ```text
//! Input: "the quick fast fox" after stop word removal and synonym expansion
//!
//!   "quick" (pos_inc=2)  ← "the" was removed upstream
//!   "fast"  (pos_inc=0)  ← alternate for "quick" at the same position
//!   "fox"   (pos_inc=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use shingler::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("world", 1, 6, 11).with_position_increment(2);
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.position_increment, 2);
//! assert_eq!(token.token_type, TokenType::Word);
//! assert_eq!(token.shingle_size, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text in the analysis pipeline.
///
/// The same type is used for tokens consumed from an upstream tokenizer and
/// for tokens produced by the shingle filter. Produced shingles carry
/// [`TokenType::Shingle`] and a `shingle_size` greater than one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the original token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1 (default): Normal increment, next position
    /// - 0: Same position as previous token (e.g., for synonyms)
    /// - >1: Skip positions (e.g., for removed stop words)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    pub position_length: usize,

    /// Token type classification
    pub token_type: TokenType,

    /// Number of input tokens joined into this token (1 for plain tokens).
    pub shingle_size: usize,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Plain word token (default)
    #[default]
    Word,
    /// Alphanumeric text (English, Latin scripts)
    Alphanum,
    /// Numeric values
    Num,
    /// CJK (Chinese, Japanese, Korean) characters
    Cjk,
    /// Synonym token injected at the position of another token
    Synonym,
    /// Multi-token shingle produced by the shingle filter
    Shingle,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// Lowercase name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Word => "word",
            TokenType::Alphanum => "alphanum",
            TokenType::Num => "num",
            TokenType::Cjk => "cjk",
            TokenType::Synonym => "synonym",
            TokenType::Shingle => "shingle",
            TokenType::Other => "other",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
            token_type: TokenType::Word,
            shingle_size: 1,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this token was built from more than one input token.
    pub fn is_shingle(&self) -> bool {
        self.shingle_size > 1
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
