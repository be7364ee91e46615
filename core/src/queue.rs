//! Replenishment queue
//!
//! Backlog cards wait here in cross-insertion pairs. On every confirmed match
//! the two freed slots are refilled from the queue:
//!
//! 1. Both pending halves exist: the card owed to the left column goes left,
//!    the card owed to the right column goes right.
//! 2. Otherwise the front pair is popped. A singleton pair fills both freed
//!    slots with the same card. A cross pair puts `first` left and `second`
//!    right, and each of them becomes a pending half owed to the other column.
//! 3. Nothing left: the freed slots are cleared.
//!
//! A card's two sides therefore never arrive together, yet every card reaches
//! both columns exactly once.

use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::log;
use crate::types::{CardId, PendingHalf, QueuePair, Side};
use crate::window::SlotWindow;

/// The slot indices vacated by a match. `None` means nothing to refill there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct FreedSlots {
    pub left: Option<u32>,
    pub right: Option<u32>,
}

impl FreedSlots {
    pub fn both(left: usize, right: usize) -> Self {
        Self {
            left: Some(left as u32),
            right: Some(right as u32),
        }
    }

    pub fn get(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
        .map(|index| index as usize)
    }
}

/// Which refill rule fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Refill {
    /// Both pending halves were placed
    PendingHalves { left: CardId, right: CardId },
    /// A cross pair was popped; both cards now owe their other half
    CrossPair { left: CardId, right: CardId },
    /// The trailing singleton filled both columns
    Singleton { card: CardId },
    /// Nothing left to show
    Cleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct ReplenishmentQueue {
    /// FIFO backlog, drained from the front
    pairs: Vec<QueuePair>,
    /// At most one entry per missing side
    pending: Vec<PendingHalf>,
}

impl ReplenishmentQueue {
    /// Group the backlog two at a time in sampled order; an odd trailing card
    /// becomes a singleton pair.
    pub fn from_backlog(cards: &[CardId]) -> Self {
        let pairs = cards
            .chunks(2)
            .map(|chunk| match *chunk {
                [first, second] => QueuePair::cross(first, second),
                [single] => QueuePair::singleton(single),
                _ => unreachable!("chunks(2) yields one or two items"),
            })
            .collect();
        Self {
            pairs,
            pending: Vec::new(),
        }
    }

    pub fn pairs(&self) -> &[QueuePair] {
        &self.pairs
    }

    pub fn pending(&self) -> &[PendingHalf] {
        &self.pending
    }

    /// Nothing queued and nothing owed
    pub fn is_drained(&self) -> bool {
        self.pairs.is_empty() && self.pending.is_empty()
    }

    fn pending_index(&self, missing: Side) -> Option<usize> {
        self.pending.iter().position(|half| half.missing == missing)
    }

    /// Refill the slots freed by one match
    pub fn refill(&mut self, window: &mut SlotWindow, freed: FreedSlots) -> Refill {
        if let (Some(left_idx), Some(right_idx)) =
            (self.pending_index(Side::Left), self.pending_index(Side::Right))
        {
            let owed_left = self.pending[left_idx].card;
            let owed_right = self.pending[right_idx].card;
            place(window, freed, Side::Left, owed_left);
            place(window, freed, Side::Right, owed_right);
            // Remove the higher index first so the lower one stays valid
            self.pending.remove(left_idx.max(right_idx));
            self.pending.remove(left_idx.min(right_idx));
            return Refill::PendingHalves {
                left: owed_left,
                right: owed_right,
            };
        }

        if !self.pairs.is_empty() {
            let pair = self.pairs.remove(0);
            if pair.is_singleton() {
                place(window, freed, Side::Left, pair.first);
                place(window, freed, Side::Right, pair.first);
                return Refill::Singleton { card: pair.first };
            }

            debug_assert!(
                self.pending.is_empty(),
                "cross pair popped while a pending half is unmatched"
            );
            if !self.pending.is_empty() {
                log::warn("refill: popping a cross pair with an unmatched pending half");
            }

            place(window, freed, Side::Left, pair.first);
            place(window, freed, Side::Right, pair.second);
            self.pending.push(PendingHalf {
                card: pair.first,
                missing: Side::Right,
            });
            self.pending.push(PendingHalf {
                card: pair.second,
                missing: Side::Left,
            });
            return Refill::CrossPair {
                left: pair.first,
                right: pair.second,
            };
        }

        for side in Side::BOTH {
            if let Some(index) = freed.get(side) {
                window.clear(side, index);
            }
        }
        Refill::Cleared
    }
}

fn place(window: &mut SlotWindow, freed: FreedSlots, side: Side, card: CardId) {
    if let Some(index) = freed.get(side) {
        window.place(side, index, card);
    }
}
