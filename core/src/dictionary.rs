//! Dictionary listing: every distinct pair, searchable and grouped by the
//! first letter of the headword.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::types::WordPair;

/// Which column provides the headword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Source word first (left → right)
    Forward,
    /// Translation first (right → left)
    Reverse,
}

impl Direction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(Direction::Forward),
            "reverse" => Some(Direction::Reverse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterGroup {
    /// Uppercased first character of every word in the group
    pub letter: String,
    pub entries: Vec<DictionaryEntry>,
}

/// Entries matching `query` (case-insensitive, either text), grouped by
/// first letter. Groups and entries within a group are sorted.
pub fn browse(pairs: &[WordPair], direction: Direction, query: &str) -> Vec<LetterGroup> {
    let query = query.trim().to_lowercase();

    let mut entries: Vec<DictionaryEntry> = pairs
        .iter()
        .map(|pair| match direction {
            Direction::Forward => DictionaryEntry {
                word: pair.left.clone(),
                translation: pair.right.clone(),
            },
            Direction::Reverse => DictionaryEntry {
                word: pair.right.clone(),
                translation: pair.left.clone(),
            },
        })
        .filter(|entry| {
            query.is_empty()
                || entry.word.to_lowercase().contains(&query)
                || entry.translation.to_lowercase().contains(&query)
        })
        .collect();

    entries.sort_by(|a, b| {
        let key_a = (first_letter(&a.word), a.word.to_lowercase());
        let key_b = (first_letter(&b.word), b.word.to_lowercase());
        key_a.cmp(&key_b)
    });

    let mut groups: Vec<LetterGroup> = Vec::new();
    for entry in entries {
        let letter = first_letter(&entry.word);
        match groups.last_mut() {
            Some(group) if group.letter == letter => group.entries.push(entry),
            _ => groups.push(LetterGroup {
                letter,
                entries: alloc::vec![entry],
            }),
        }
    }
    groups
}

fn first_letter(word: &str) -> String {
    word.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
