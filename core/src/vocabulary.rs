//! Statically compiled word sets from /vocabulary/sets.json.
//! Generated at build time by build.rs, so nothing is parsed at runtime.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::types::WordPair;

/// A named vocabulary set the player can enable or disable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSet {
    pub id: String,
    pub name: String,
    pub description: String,
    pub words: Vec<WordPair>,
}

/// Set metadata for the settings screen (no word list)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSetInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub word_count: u32,
}

impl From<&WordSet> for WordSetInfo {
    fn from(set: &WordSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            description: set.description.clone(),
            word_count: set.words.len() as u32,
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/vocabulary_generated.rs"));

/// Ids of every set, in vocabulary order
pub fn all_set_ids(sets: &[WordSet]) -> Vec<String> {
    sets.iter().map(|set| set.id.clone()).collect()
}

/// Pairs of the enabled sets with exact `(left, right)` duplicates removed.
/// Sets are visited in vocabulary order, not in `enabled` order.
pub fn unique_pairs(sets: &[WordSet], enabled: &[String]) -> Vec<WordPair> {
    collect_unique(sets.iter().filter(|set| enabled.contains(&set.id)))
}

/// Every distinct pair across all sets (dictionary listing)
pub fn all_unique_pairs(sets: &[WordSet]) -> Vec<WordPair> {
    collect_unique(sets.iter())
}

fn collect_unique<'a>(sets: impl Iterator<Item = &'a WordSet>) -> Vec<WordPair> {
    dedup_pairs(sets.flat_map(|set| set.words.iter().cloned()))
}

/// Drop exact `(left, right)` repeats, keeping the first occurrence in order
pub fn dedup_pairs(pairs: impl IntoIterator<Item = WordPair>) -> Vec<WordPair> {
    let mut seen: BTreeSet<WordPair> = BTreeSet::new();
    let mut result = Vec::new();
    for pair in pairs {
        if seen.insert(pair.clone()) {
            result.push(pair);
        }
    }
    result
}
