use alloc::string::String;
use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Unique identifier for cards within a session
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    TypeInfo,
    MaxEncodedLen,
)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for CardId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Column of the slot window. `Left` shows the source word, `Right` its translation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    TypeInfo,
    MaxEncodedLen,
)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Parse the frontend spelling ("left" / "right")
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// A translation pair as it appears in a vocabulary set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct WordPair {
    /// Source-language word (left column)
    pub left: String,
    /// Target-language word (right column)
    pub right: String,
}

impl WordPair {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: String::from(left),
            right: String::from(right),
        }
    }
}

/// An immutable card created once at session start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: CardId,
    pub left_text: String,
    pub right_text: String,
}

impl CardRecord {
    pub fn new(id: CardId, pair: WordPair) -> Self {
        Self {
            id,
            left_text: pair.left,
            right_text: pair.right,
        }
    }

    /// Both texts are identical, so either card can stand in for the other
    pub fn same_words(&self, other: &CardRecord) -> bool {
        self.left_text == other.left_text && self.right_text == other.right_text
    }

    /// Text shown for this card in the given column
    pub fn text(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_text,
            Side::Right => &self.right_text,
        }
    }
}

/// Two backlog cards destined for cross-column insertion.
/// `first == second` marks the singleton pair left over from an odd backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct QueuePair {
    pub first: CardId,
    pub second: CardId,
}

impl QueuePair {
    pub fn cross(first: CardId, second: CardId) -> Self {
        Self { first, second }
    }

    pub fn singleton(card: CardId) -> Self {
        Self {
            first: card,
            second: card,
        }
    }

    pub fn is_singleton(&self) -> bool {
        self.first == self.second
    }
}

/// A card already shown in one column, still owed to the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct PendingHalf {
    pub card: CardId,
    pub missing: Side,
}

/// The card the player currently has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub card: CardId,
    pub side: Side,
}
