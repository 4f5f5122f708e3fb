//! Pull-based shingle generation over a fallible token source.
//!
//! A [`ShingleStream`] reads input tokens into a small window and, for each
//! position leaving the window, queues every output token anchored there
//! before pulling more input. Output order per anchor is fixed:
//!
//! 1. the anchor as a unigram (when `output_unigrams` is set), followed by
//!    its alternates (tokens with a position increment of 0);
//! 2. shingles of increasing size, from `min_shingle_size` up to
//!    `max_shingle_size`; within one size the primary path precedes the
//!    variants built from alternates.
//!
//! The first token of an anchor carries the anchor's position increment;
//! the rest carry 0. A position increment greater than 1 ends the current
//! segment, so no shingle spans the removed tokens.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;

use log::{debug, trace};

use crate::analysis::token::Token;
use crate::error::Result;

use super::config::ShingleConfig;
use super::window::ShingleWindow;

/// Streaming shingle generator over an upstream token source.
///
/// Items are `Result<Token, E>` where `E` is the source's own error type.
/// Upstream errors are returned as they are and end the stream.
///
/// # Examples
///
/// ```
/// use shingler::analysis::token::Token;
/// use shingler::analysis::token_filter::shingle::{ShingleConfig, ShingleStream};
///
/// let config = ShingleConfig::new().with_output_unigrams(false);
/// let source = vec![Token::new("quick", 0), Token::new("brown", 1), Token::new("fox", 2)]
///     .into_iter()
///     .map(Ok::<Token, std::convert::Infallible>);
///
/// let texts: Vec<String> = ShingleStream::open(config, source)
///     .unwrap()
///     .map(|token| token.unwrap().text)
///     .collect();
/// assert_eq!(texts, vec!["quick brown", "brown fox"]);
/// ```
pub struct ShingleStream<I> {
    config: Arc<ShingleConfig>,
    /// `None` once the source is exhausted, failed, or the stream is closed
    source: Option<I>,
    /// Token read from the source but not yet placed in the window
    lookahead: Option<Token>,
    window: ShingleWindow,
    pending: VecDeque<Token>,
    /// Unigrams held back while no shingle has been produced yet.
    ///
    /// Unbounded: if every segment is shorter than `min_shingle_size`, the
    /// whole stream is held here until the end of input.
    deferred: Vec<Token>,
    /// Increment of anchors that produced no output
    carried_increment: usize,
    shingle_emitted: bool,
    finished: bool,
}

impl<I, E> ShingleStream<I>
where
    I: Iterator<Item = std::result::Result<Token, E>>,
{
    /// Validate `config` and start generating shingles from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ShinglerError::InvalidConfig`](crate::error::ShinglerError::InvalidConfig)
    /// if the configuration violates the size invariants.
    pub fn open(config: ShingleConfig, source: I) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(Arc::new(config), source))
    }

    /// Build a stream from an already validated configuration.
    pub(crate) fn with_config(config: Arc<ShingleConfig>, source: I) -> Self {
        trace!(
            "[{}] opening shingle stream (sizes {}..={})",
            config.name(),
            config.min_shingle_size(),
            config.max_shingle_size()
        );
        let window = ShingleWindow::new(config.max_shingle_size());
        ShingleStream {
            config,
            source: Some(source),
            lookahead: None,
            window,
            pending: VecDeque::new(),
            deferred: Vec::new(),
            carried_increment: 0,
            shingle_emitted: false,
            finished: false,
        }
    }

    /// The configuration driving this stream.
    pub fn config(&self) -> &ShingleConfig {
        &self.config
    }

    /// Release the source and every buffered token.
    ///
    /// Calling `next` afterwards returns `None`. Dropping the stream has the
    /// same effect.
    pub fn close(&mut self) {
        if !self.finished {
            debug!(
                "[{}] shingle stream closed with {} queued tokens",
                self.config.name(),
                self.pending.len()
            );
        }
        self.source = None;
        self.lookahead = None;
        self.window.clear();
        self.pending.clear();
        self.deferred.clear();
        self.finished = true;
    }

    fn pull(&mut self) -> std::result::Result<Option<Token>, E> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        match source.next() {
            Some(Ok(token)) => Ok(Some(token)),
            Some(Err(err)) => Err(err),
            None => {
                self.source = None;
                Ok(None)
            }
        }
    }

    /// Fill the window until its anchor is complete, then emit that anchor.
    ///
    /// The anchor is complete once the window is full and the token after
    /// the newest position is known, or once the segment is closed by a
    /// gap or the end of input.
    fn advance(&mut self) -> std::result::Result<(), E> {
        loop {
            if self.lookahead.is_none() {
                self.lookahead = self.pull()?;
            }
            let Some(token) = self.lookahead.take() else {
                break;
            };

            if token.position_increment == 0 {
                if let Some(token) = self.window.attach_alternate(token) {
                    self.window.push(token);
                }
                continue;
            }
            if token.position_increment > 1 && !self.window.is_empty() {
                trace!(
                    "[{}] gap of {} positions before {:?}, flushing {} buffered positions",
                    self.config.name(),
                    token.position_increment - 1,
                    token.text,
                    self.window.len()
                );
                self.lookahead = Some(token);
                break;
            }
            if self.window.is_full() {
                self.lookahead = Some(token);
                break;
            }
            self.window.push(token);
        }

        if self.window.is_empty() {
            self.finish();
        } else {
            self.emit_anchor();
        }
        Ok(())
    }

    fn emit_anchor(&mut self) {
        let Some(anchor_increment) = self.window.anchor_increment() else {
            return;
        };

        let mut produced = Vec::new();
        if self.config.output_unigrams() {
            produced.extend(self.window.anchor_unigrams());
        }

        let largest = self.config.max_shingle_size().min(self.window.len());
        let mut has_shingles = false;
        for size in self.config.min_shingle_size()..=largest {
            let shingles = self
                .window
                .anchor_shingles(size, self.config.token_separator());
            has_shingles |= !shingles.is_empty();
            produced.extend(shingles);
        }

        if has_shingles && !self.shingle_emitted {
            self.shingle_emitted = true;
            self.deferred.clear();
        } else if !has_shingles && self.defers_unigrams() {
            self.deferred.extend(self.window.anchor_unigrams());
        }
        self.window.pop_anchor();

        if produced.is_empty() {
            self.carried_increment += anchor_increment;
            return;
        }
        for (i, token) in produced.iter_mut().enumerate() {
            token.position_increment = if i == 0 {
                self.carried_increment + anchor_increment
            } else {
                0
            };
        }
        self.carried_increment = 0;
        self.pending.extend(produced);
    }

    fn defers_unigrams(&self) -> bool {
        !self.config.output_unigrams()
            && self.config.output_unigrams_if_no_shingles()
            && !self.shingle_emitted
    }

    fn finish(&mut self) {
        if !self.deferred.is_empty() {
            trace!(
                "[{}] no shingles produced, emitting {} unigrams",
                self.config.name(),
                self.deferred.len()
            );
            self.pending.extend(self.deferred.drain(..));
        }
        self.finished = true;
    }
}

impl<I, E> Iterator for ShingleStream<I>
where
    I: Iterator<Item = std::result::Result<Token, E>>,
{
    type Item = std::result::Result<Token, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.advance() {
                self.close();
                return Some(Err(err));
            }
        }
    }
}

impl<I, E> FusedIterator for ShingleStream<I> where
    I: Iterator<Item = std::result::Result<Token, E>>
{
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::analysis::token::TokenType;

    fn words(texts: &[&str]) -> Vec<Token> {
        let mut offset = 0;
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let token = Token::with_offsets(*text, i, offset, offset + text.len());
                offset += text.len() + 1;
                token
            })
            .collect()
    }

    fn run(config: ShingleConfig, tokens: Vec<Token>) -> Vec<Token> {
        ShingleStream::open(config, tokens.into_iter().map(Ok::<Token, Infallible>))
            .unwrap()
            .map(|result| result.unwrap())
            .collect()
    }

    fn summary(tokens: &[Token]) -> Vec<(String, usize)> {
        tokens
            .iter()
            .map(|t| (t.text.clone(), t.position_increment))
            .collect()
    }

    fn expected(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(t, i)| (t.to_string(), *i)).collect()
    }

    #[test]
    fn test_bigrams_without_unigrams() {
        let config = ShingleConfig::new().with_output_unigrams(false);
        let output = run(config, words(&["quick", "brown", "fox"]));

        assert_eq!(
            summary(&output),
            expected(&[("quick brown", 1), ("brown fox", 1)])
        );
        assert!(output.iter().all(|t| t.shingle_size == 2));
        assert!(output.iter().all(|t| t.token_type == TokenType::Shingle));
        assert_eq!((output[1].start_offset, output[1].end_offset), (6, 15));
    }

    #[test]
    fn test_unigram_precedes_shingles_of_same_anchor() {
        let output = run(ShingleConfig::new(), words(&["quick", "brown", "fox"]));

        assert_eq!(
            summary(&output),
            expected(&[
                ("quick", 1),
                ("quick brown", 0),
                ("brown", 1),
                ("brown fox", 0),
                ("fox", 1),
            ])
        );
        assert_eq!(output[0].token_type, TokenType::Word);
        assert_eq!(output[0].shingle_size, 1);
    }

    #[test]
    fn test_size_range_smallest_first() {
        let config = ShingleConfig::new().with_max_shingle_size(3);
        let output = run(config, words(&["a", "b", "c", "d"]));

        assert_eq!(
            summary(&output),
            expected(&[
                ("a", 1),
                ("a b", 0),
                ("a b c", 0),
                ("b", 1),
                ("b c", 0),
                ("b c d", 0),
                ("c", 1),
                ("c d", 0),
                ("d", 1),
            ])
        );
    }

    #[test]
    fn test_min_size_three_skips_bigrams() {
        let config = ShingleConfig::new()
            .with_min_shingle_size(3)
            .with_max_shingle_size(3)
            .with_output_unigrams(false);
        let output = run(config, words(&["a", "b", "c", "d"]));

        assert_eq!(summary(&output), expected(&[("a b c", 1), ("b c d", 1)]));
    }

    #[test]
    fn test_gap_blocks_shingles() {
        let tokens = vec![
            Token::new("quick", 0),
            Token::new("fox", 2).with_position_increment(2),
        ];
        let output = run(ShingleConfig::new(), tokens);

        assert_eq!(summary(&output), expected(&[("quick", 1), ("fox", 2)]));
        assert!(output.iter().all(|t| !t.is_shingle()));
    }

    #[test]
    fn test_increment_carried_over_silent_anchors() {
        let tokens = vec![
            Token::new("a", 0),
            Token::new("b", 1),
            Token::new("c", 2),
            Token::new("d", 4).with_position_increment(2),
            Token::new("e", 5),
        ];
        let config = ShingleConfig::new().with_output_unigrams(false);
        let output = run(config, tokens);

        // "c" sits alone before the gap, so "d e" carries its increment too
        assert_eq!(
            summary(&output),
            expected(&[("a b", 1), ("b c", 1), ("d e", 3)])
        );
        assert_eq!(output[2].position, 4);
    }

    #[test]
    fn test_alternates_shingled_independently() {
        let tokens = vec![
            Token::new("big", 0),
            Token::new("large", 0)
                .with_position_increment(0)
                .with_token_type(TokenType::Synonym),
            Token::new("dog", 1),
        ];
        let output = run(ShingleConfig::new(), tokens);

        assert_eq!(
            summary(&output),
            expected(&[
                ("big", 1),
                ("large", 0),
                ("big dog", 0),
                ("large dog", 0),
                ("dog", 1),
            ])
        );
        assert_eq!(output[1].token_type, TokenType::Synonym);
        assert_eq!(output[3].token_type, TokenType::Shingle);
    }

    #[test]
    fn test_alternate_of_last_position_waits_for_next_token() {
        let tokens = vec![
            Token::new("big", 0),
            Token::new("dog", 1),
            Token::new("hound", 1).with_position_increment(0),
            Token::new("barks", 2),
        ];
        let config = ShingleConfig::new().with_output_unigrams(false);
        let output = run(config, tokens);

        assert_eq!(
            summary(&output),
            expected(&[
                ("big dog", 1),
                ("big hound", 0),
                ("dog barks", 1),
                ("hound barks", 0),
            ])
        );
    }

    #[test]
    fn test_fallback_single_token() {
        let config = ShingleConfig::new()
            .with_output_unigrams(false)
            .with_output_unigrams_if_no_shingles(true);
        let output = run(config, words(&["hello"]));

        assert_eq!(summary(&output), expected(&[("hello", 1)]));
        assert_eq!(output[0].shingle_size, 1);
    }

    #[test]
    fn test_fallback_discarded_once_shingles_appear() {
        let tokens = vec![
            Token::new("a", 0),
            Token::new("b", 2).with_position_increment(2),
            Token::new("c", 3),
        ];
        let config = ShingleConfig::new()
            .with_output_unigrams(false)
            .with_output_unigrams_if_no_shingles(true);
        let output = run(config, tokens);

        assert_eq!(summary(&output), expected(&[("b c", 3)]));
    }

    #[test]
    fn test_fallback_across_gaps() {
        let tokens = vec![
            Token::new("a", 0),
            Token::new("b", 2).with_position_increment(2),
        ];
        let config = ShingleConfig::new()
            .with_output_unigrams(false)
            .with_output_unigrams_if_no_shingles(true);
        let output = run(config, tokens);

        assert_eq!(summary(&output), expected(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_fallback_ignored_when_unigrams_enabled() {
        let config = ShingleConfig::new().with_output_unigrams_if_no_shingles(true);
        let output = run(config.clone(), words(&["hello"]));
        assert_eq!(summary(&output), expected(&[("hello", 1)]));

        let tokens = vec![
            Token::new("a", 0),
            Token::new("b", 2).with_position_increment(2),
        ];
        let output = run(config, tokens);
        assert_eq!(summary(&output), expected(&[("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_huge_max_shingle_size() {
        let config = ShingleConfig::new().with_max_shingle_size(usize::MAX);
        let output = run(config, words(&["a", "b"]));

        assert_eq!(
            summary(&output),
            expected(&[("a", 1), ("a b", 0), ("b", 1)])
        );
    }

    #[test]
    fn test_no_fallback_when_disabled() {
        let config = ShingleConfig::new().with_output_unigrams(false);
        assert!(run(config, words(&["hello"])).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(run(ShingleConfig::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let source = Vec::<std::result::Result<Token, Infallible>>::new().into_iter();
        let result = ShingleStream::open(ShingleConfig::new().with_min_shingle_size(1), source);
        assert!(result.is_err());
    }

    #[test]
    fn test_upstream_error_returned_verbatim() {
        let source = vec![
            Ok(Token::new("a", 0)),
            Ok(Token::new("b", 1)),
            Err("tokenizer failed"),
            Ok(Token::new("c", 2)),
        ];
        let mut stream = ShingleStream::open(ShingleConfig::new(), source.into_iter()).unwrap();

        assert_eq!(stream.next(), Some(Err("tokenizer failed")));
        assert_eq!(stream.next(), None);
        assert_eq!(stream.next(), None);
    }

    #[test]
    fn test_close_ends_stream() {
        let tokens = words(&["a", "b", "c", "d"]);
        let mut stream =
            ShingleStream::open(ShingleConfig::new(), tokens.into_iter().map(Ok::<_, Infallible>))
                .unwrap();

        assert_eq!(stream.next().unwrap().unwrap().text, "a");
        stream.close();
        assert!(stream.next().is_none());
    }
}
