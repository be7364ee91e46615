use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::queue::ReplenishmentQueue;
use crate::rng::GameRng;
use crate::schedule::TICK_INTERVAL_MS;
use crate::types::*;
use crate::window::SlotWindow;

/// Number of visible rows per column
pub const WINDOW_SIZE: u32 = 5;
/// A cross pair needs at least one complete row beside it to stay playable
pub const MIN_WINDOW_SIZE: u32 = 2;
/// Default number of cards per session
pub const DEFAULT_CARD_COUNT: u32 = 60;
/// Default countdown in seconds
pub const DEFAULT_TIME_LIMIT: u32 = 120;
/// Setup-screen step and floor for the card count
pub const CARD_COUNT_STEP: u32 = 10;
/// Setup-screen step and floor for the time limit
pub const TIME_LIMIT_STEP: u32 = 5;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// No session running
    Setup,
    Playing,
    Victory,
    Defeat,
}

impl GamePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Setup => "setup",
            GamePhase::Playing => "playing",
            GamePhase::Victory => "victory",
            GamePhase::Defeat => "defeat",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Session settings chosen on the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub card_count: u32,
    pub timer_enabled: bool,
    pub time_limit_seconds: u32,
    pub window_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            card_count: DEFAULT_CARD_COUNT,
            timer_enabled: true,
            time_limit_seconds: DEFAULT_TIME_LIMIT,
            window_size: WINDOW_SIZE,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> GameResult<()> {
        if self.card_count == 0 {
            return Err(GameError::InvalidCardCount {
                count: self.card_count,
            });
        }
        if self.window_size < MIN_WINDOW_SIZE {
            return Err(GameError::InvalidWindowSize {
                size: self.window_size,
            });
        }
        Ok(())
    }

    pub fn increase_card_count(&mut self) {
        self.card_count = self.card_count.saturating_add(CARD_COUNT_STEP);
    }

    pub fn decrease_card_count(&mut self) {
        self.card_count = self
            .card_count
            .saturating_sub(CARD_COUNT_STEP)
            .max(CARD_COUNT_STEP);
    }

    pub fn increase_time_limit(&mut self) {
        self.time_limit_seconds = self.time_limit_seconds.saturating_add(TIME_LIMIT_STEP);
    }

    pub fn decrease_time_limit(&mut self) {
        self.time_limit_seconds = self
            .time_limit_seconds
            .saturating_sub(TIME_LIMIT_STEP)
            .max(TIME_LIMIT_STEP);
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Every card matched
    Victory,
    /// Countdown reached zero
    Defeat,
}

/// Figures for the end-of-game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub outcome: Outcome,
    pub elapsed_seconds: u32,
    pub completed: u32,
    pub card_count: u32,
    pub max_combo: u32,
}

/// The complete state of one play-through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bumped on every (re)start; tags scheduled tasks
    pub generation: u32,
    pub phase: GamePhase,
    pub config: GameConfig,
    /// Card table, indexed by `CardId`
    pub cards: Vec<CardRecord>,
    pub window: SlotWindow,
    pub queue: ReplenishmentQueue,
    pub selection: Option<Selection>,
    /// Set on mismatch, cleared on the next click or by `ClearErrors`
    pub error_ids: BTreeSet<CardId>,
    /// Set on match, cleared on the next click or when the fade completes
    pub correct_ids: BTreeSet<CardId>,
    /// Set on match, cleared when the fade completes; clicks are ignored
    pub fading_ids: BTreeSet<CardId>,
    /// Cards whose left half has been matched away
    pub matched_left: BTreeSet<CardId>,
    /// Cards whose right half has been matched away
    pub matched_right: BTreeSet<CardId>,
    pub completed: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub elapsed_seconds: u32,
    pub remaining_seconds: u32,
    /// Virtual-clock time of the next timer tick
    pub next_tick_ms: u64,
    pub summary: Option<GameSummary>,
}

impl Session {
    /// An idle session waiting on the setup screen
    pub fn new(generation: u32) -> Self {
        let config = GameConfig::default();
        Self {
            generation,
            phase: GamePhase::Setup,
            config,
            cards: Vec::new(),
            window: SlotWindow::empty(config.window_size as usize),
            queue: ReplenishmentQueue::default(),
            selection: None,
            error_ids: BTreeSet::new(),
            correct_ids: BTreeSet::new(),
            fading_ids: BTreeSet::new(),
            matched_left: BTreeSet::new(),
            matched_right: BTreeSet::new(),
            completed: 0,
            combo: 0,
            max_combo: 0,
            elapsed_seconds: 0,
            remaining_seconds: 0,
            next_tick_ms: 0,
            summary: None,
        }
    }

    /// Lay out a fresh session: the first `window_size` cards go on the
    /// board, the rest into the queue.
    pub fn start(
        generation: u32,
        config: GameConfig,
        cards: Vec<CardRecord>,
        rng: &mut impl GameRng,
        now_ms: u64,
    ) -> Self {
        let size = config.window_size as usize;
        let ids: Vec<CardId> = cards.iter().map(|card| card.id).collect();
        let split = size.min(ids.len());

        Self {
            phase: GamePhase::Playing,
            config,
            window: SlotWindow::seed(&ids[..split], size, rng),
            queue: ReplenishmentQueue::from_backlog(&ids[split..]),
            cards,
            remaining_seconds: config.time_limit_seconds,
            next_tick_ms: now_ms + TICK_INTERVAL_MS,
            ..Self::new(generation)
        }
    }

    pub fn card(&self, id: CardId) -> Option<&CardRecord> {
        self.cards.get(id.index())
    }

    pub fn card_count(&self) -> u32 {
        self.cards.len() as u32
    }

    /// Check every structural invariant of the window and backlog.
    pub fn verify_invariants(&self) -> GameResult<()> {
        let size = self.config.window_size as usize;
        for side in Side::BOTH {
            let column = self.window.column(side);
            if column.len() != size {
                return violation(format!(
                    "{} column has {} slots, expected {size}",
                    side.as_str(),
                    column.len()
                ));
            }
            let mut seen = BTreeSet::new();
            for slot in column.iter().flatten() {
                if self.card(slot.card).is_none() {
                    return violation(format!("unknown card {} on the board", slot.card));
                }
                if !seen.insert(slot.card) {
                    return violation(format!(
                        "card {} shown twice in the {} column",
                        slot.card,
                        side.as_str()
                    ));
                }
            }
        }

        for side in Side::BOTH {
            let owed = self
                .queue
                .pending()
                .iter()
                .filter(|half| half.missing == side)
                .count();
            if owed > 1 {
                return violation(format!("{owed} pending halves missing {}", side.as_str()));
            }
        }

        // Every card must be accounted for exactly once per column
        let mut tally = vec![[0u32; 2]; self.cards.len()];
        let mut bump = |id: CardId, side: Side| -> GameResult<()> {
            let entry = tally
                .get_mut(id.index())
                .ok_or_else(|| GameError::InvariantViolation {
                    reason: format!("unknown card {id} in bookkeeping"),
                })?;
            entry[side as usize] += 1;
            Ok(())
        };
        for side in Side::BOTH {
            for id in self.window.live_cards(side) {
                bump(id, side)?;
            }
        }
        for pair in self.queue.pairs() {
            bump(pair.first, Side::Left)?;
            bump(pair.first, Side::Right)?;
            if !pair.is_singleton() {
                bump(pair.second, Side::Left)?;
                bump(pair.second, Side::Right)?;
            }
        }
        for half in self.queue.pending() {
            bump(half.card, half.missing)?;
        }
        for &id in &self.matched_left {
            bump(id, Side::Left)?;
        }
        for &id in &self.matched_right {
            bump(id, Side::Right)?;
        }

        for (index, counts) in tally.iter().enumerate() {
            for side in Side::BOTH {
                let count = counts[side as usize];
                if count != 1 {
                    return violation(format!(
                        "card #{index} accounted {count} times in the {} column",
                        side.as_str()
                    ));
                }
            }
        }
        Ok(())
    }
}

fn violation(reason: String) -> GameResult<()> {
    Err(GameError::InvariantViolation { reason })
}
