//! Word pool and card factory
//!
//! Turns the enabled vocabulary into the ordered, identified card set a
//! session is played with.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{GameError, GameResult};
use crate::rng::GameRng;
use crate::types::{CardId, CardRecord, WordPair};
use crate::vocabulary::{dedup_pairs, unique_pairs, WordSet};

/// Deduplicated translation pairs of the enabled sets
#[derive(Debug, Clone)]
pub struct WordPool {
    pairs: Vec<WordPair>,
}

impl WordPool {
    /// Build the pool from the enabled set ids.
    ///
    /// Fails only when nothing is enabled or the enabled sets are empty.
    pub fn from_sets(sets: &[WordSet], enabled: &[String]) -> GameResult<Self> {
        if enabled.is_empty() {
            return Err(GameError::NoEnabledSets);
        }
        Self::from_pairs(unique_pairs(sets, enabled))
    }

    /// Build the pool from an explicit list; exact repeats are dropped.
    pub fn from_pairs(pairs: Vec<WordPair>) -> GameResult<Self> {
        let pairs = dedup_pairs(pairs);
        if pairs.is_empty() {
            return Err(GameError::EmptyWordPool);
        }
        Ok(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Exactly `count` pairs in random order.
    ///
    /// A pool smaller than `count` is repeated whole until it covers the
    /// request, so literal duplicates become expected.
    pub fn sample(&self, count: usize, rng: &mut impl GameRng) -> Vec<WordPair> {
        let mut words = self.pairs.clone();
        while words.len() < count {
            words.extend_from_slice(&self.pairs);
        }
        rng.shuffle(&mut words);
        words.truncate(count);
        words
    }
}

/// Give every sampled pair a sequential id, starting at 0
pub fn create_cards(words: Vec<WordPair>) -> Vec<CardRecord> {
    words
        .into_iter()
        .enumerate()
        .map(|(index, pair)| CardRecord::new(CardId(index as u32), pair))
        .collect()
}
