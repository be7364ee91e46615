//! Error types for game operations
//!
//! `no_std` compatible. Only invariant reports carry free text.

use alloc::string::String;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::{CardId, Side};

/// Errors surfaced by the engine and its helpers
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// No vocabulary set is enabled in the settings
    NoEnabledSets,
    /// The enabled sets contain no words at all
    EmptyWordPool,
    /// Card count must be at least one
    InvalidCardCount { count: u32 },
    /// Window size must be at least two
    InvalidWindowSize { size: u32 },
    /// Selected card is not shown in that column
    CardNotInColumn { id: CardId, side: Side },
    /// Internal bookkeeping no longer adds up
    InvariantViolation { reason: String },
    /// Snapshot bytes could not be decoded
    SnapshotDecode,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::NoEnabledSets => write!(f, "no word sets are enabled"),
            GameError::EmptyWordPool => write!(f, "the enabled word sets contain no words"),
            GameError::InvalidCardCount { count } => write!(f, "invalid card count: {count}"),
            GameError::InvalidWindowSize { size } => write!(f, "invalid window size: {size}"),
            GameError::CardNotInColumn { id, side } => {
                write!(f, "card {id} is not shown in the {} column", side.as_str())
            }
            GameError::InvariantViolation { reason } => {
                write!(f, "invariant violation: {reason}")
            }
            GameError::SnapshotDecode => write!(f, "failed to decode engine snapshot"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
