//! View types for UI serialization
//!
//! This module provides the read-only snapshot the frontend renders from.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::state::*;
use crate::types::*;
use crate::window::Slot;

/// One rendered card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub id: CardId,
    /// Word shown in this column
    pub text: String,
    pub fading: bool,
    pub selected: bool,
    pub error: bool,
    pub correct: bool,
}

/// The complete game view sent to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// Source-language column (None = empty slot)
    pub left: Vec<Option<SlotView>>,
    /// Target-language column (None = empty slot)
    pub right: Vec<Option<SlotView>>,
    pub selection: Option<Selection>,
    pub error_ids: Vec<CardId>,
    pub correct_ids: Vec<CardId>,
    pub completed: u32,
    pub card_count: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub timer_enabled: bool,
    pub elapsed_seconds: u32,
    pub remaining_seconds: u32,
    /// `elapsed_seconds` as m:ss
    pub elapsed_label: String,
    /// `remaining_seconds` as m:ss
    pub remaining_label: String,
    /// Current game phase
    pub phase: String,
    /// Cross pairs still waiting in the backlog
    pub queued_pairs: u32,
    /// Cards shown on one side only
    pub pending_halves: u32,
    pub summary: Option<GameSummary>,
}

impl GameView {
    pub fn from_session(session: &Session) -> Self {
        let column = |side: Side| -> Vec<Option<SlotView>> {
            session
                .window
                .column(side)
                .iter()
                .map(|slot| slot.and_then(|slot| slot_view(session, side, slot)))
                .collect()
        };

        Self {
            left: column(Side::Left),
            right: column(Side::Right),
            selection: session.selection,
            error_ids: session.error_ids.iter().copied().collect(),
            correct_ids: session.correct_ids.iter().copied().collect(),
            completed: session.completed,
            card_count: session.card_count(),
            combo: session.combo,
            max_combo: session.max_combo,
            timer_enabled: session.config.timer_enabled,
            elapsed_seconds: session.elapsed_seconds,
            remaining_seconds: session.remaining_seconds,
            elapsed_label: format_time(session.elapsed_seconds),
            remaining_label: format_time(session.remaining_seconds),
            phase: String::from(session.phase.as_str()),
            queued_pairs: session.queue.pairs().len() as u32,
            pending_halves: session.queue.pending().len() as u32,
            summary: session.summary,
        }
    }
}

fn slot_view(session: &Session, side: Side, slot: Slot) -> Option<SlotView> {
    // Slots pointing outside the card table are omitted
    let card = session.card(slot.card)?;
    Some(SlotView {
        id: card.id,
        text: String::from(card.text(side)),
        fading: slot.fading,
        selected: session.selection == Some(Selection {
            card: card.id,
            side,
        }),
        error: session.error_ids.contains(&card.id),
        correct: session.correct_ids.contains(&card.id),
    })
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
