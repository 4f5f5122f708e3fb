//! Sliding window of token positions used to build shingles.

use std::collections::VecDeque;

use crate::analysis::token::{Token, TokenType};

/// One position in the window: the token that opened it plus any tokens
/// stacked on it with a position increment of 0.
#[derive(Clone, Debug)]
struct Slot {
    primary: Token,
    alternates: Vec<Token>,
}

impl Slot {
    fn token(&self, alternate: Option<usize>) -> &Token {
        match alternate {
            Some(i) => &self.alternates[i],
            None => &self.primary,
        }
    }
}

/// Bounded window over the positions of one gap-free segment.
///
/// The oldest position is the anchor: every shingle built by the window
/// starts there.
#[derive(Clone, Debug)]
pub(crate) struct ShingleWindow {
    slots: VecDeque<Slot>,
    capacity: usize,
}

impl ShingleWindow {
    pub(crate) fn new(capacity: usize) -> Self {
        ShingleWindow {
            slots: VecDeque::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Open a new position with `token` as its primary token.
    pub(crate) fn push(&mut self, token: Token) {
        debug_assert!(!self.is_full());
        self.slots.push_back(Slot {
            primary: token,
            alternates: Vec::new(),
        });
    }

    /// Stack `token` on the newest position. Returns the token back if the
    /// window is empty.
    pub(crate) fn attach_alternate(&mut self, token: Token) -> Option<Token> {
        match self.slots.back_mut() {
            Some(slot) => {
                slot.alternates.push(token);
                None
            }
            None => Some(token),
        }
    }

    /// Position increment of the anchor, if any.
    pub(crate) fn anchor_increment(&self) -> Option<usize> {
        self.slots.front().map(|slot| slot.primary.position_increment)
    }

    /// Drop the anchor, making the next position the new anchor.
    pub(crate) fn pop_anchor(&mut self) {
        self.slots.pop_front();
    }

    /// The anchor's tokens as unigrams: the primary token first, then its
    /// alternates in arrival order.
    pub(crate) fn anchor_unigrams(&self) -> Vec<Token> {
        let Some(anchor) = self.slots.front() else {
            return Vec::new();
        };
        let mut unigrams = Vec::with_capacity(1 + anchor.alternates.len());
        unigrams.push(as_unigram(&anchor.primary));
        unigrams.extend(anchor.alternates.iter().map(as_unigram));
        unigrams
    }

    /// Every shingle of `size` positions starting at the anchor.
    ///
    /// The primary path comes first. Each alternate then yields one more
    /// shingle in which it replaces the primary token of its position, in
    /// position order. Returns nothing if fewer than `size` positions are
    /// buffered.
    pub(crate) fn anchor_shingles(&self, size: usize, separator: &str) -> Vec<Token> {
        if size < 2 || size > self.slots.len() {
            return Vec::new();
        }

        let mut shingles = vec![self.build_shingle(size, separator, None)];
        for (slot_index, slot) in self.slots.iter().take(size).enumerate() {
            for alternate in 0..slot.alternates.len() {
                shingles.push(self.build_shingle(
                    size,
                    separator,
                    Some((slot_index, alternate)),
                ));
            }
        }
        shingles
    }

    fn build_shingle(
        &self,
        size: usize,
        separator: &str,
        substitution: Option<(usize, usize)>,
    ) -> Token {
        let parts: Vec<&Token> = self
            .slots
            .iter()
            .take(size)
            .enumerate()
            .map(|(i, slot)| match substitution {
                Some((slot_index, alternate)) if slot_index == i => slot.token(Some(alternate)),
                _ => slot.token(None),
            })
            .collect();

        let first = parts[0];
        let last = parts[parts.len() - 1];
        let text = parts
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(separator);

        Token {
            text,
            position: first.position,
            start_offset: first.start_offset,
            end_offset: last.end_offset,
            position_increment: first.position_increment,
            position_length: size,
            token_type: TokenType::Shingle,
            shingle_size: size,
        }
    }
}

fn as_unigram(token: &Token) -> Token {
    Token {
        shingle_size: 1,
        ..token.clone()
    }
}
