//! Slot window: the two fixed-length columns the player sees

use alloc::vec;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;
use crate::types::{CardId, Side};

/// An occupied slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub card: CardId,
    /// Matched and waiting for its refill
    pub fading: bool,
}

impl Slot {
    pub fn new(card: CardId) -> Self {
        Self {
            card,
            fading: false,
        }
    }
}

/// Left (source) and right (target) columns, both exactly `size` long.
/// The two columns are ordered independently of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindow {
    left: Vec<Option<Slot>>,
    right: Vec<Option<Slot>>,
}

impl SlotWindow {
    pub fn empty(size: usize) -> Self {
        Self {
            left: vec![None; size],
            right: vec![None; size],
        }
    }

    /// Lay out the opening cards, each column in its own random order.
    /// Fewer cards than `size` leaves the remaining slots empty.
    pub fn seed(cards: &[CardId], size: usize, rng: &mut impl GameRng) -> Self {
        let mut opening: Vec<Option<Slot>> = cards
            .iter()
            .take(size)
            .map(|&id| Some(Slot::new(id)))
            .collect();
        opening.resize(size, None);

        Self {
            left: rng.shuffled(&opening),
            right: rng.shuffled(&opening),
        }
    }

    pub fn size(&self) -> usize {
        self.left.len()
    }

    pub fn column(&self, side: Side) -> &[Option<Slot>] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn column_mut(&mut self, side: Side) -> &mut Vec<Option<Slot>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Index of `card` in the given column
    pub fn position(&self, side: Side, card: CardId) -> Option<usize> {
        self.column(side)
            .iter()
            .position(|slot| slot.map(|s| s.card) == Some(card))
    }

    pub fn slot(&self, side: Side, index: usize) -> Option<Slot> {
        self.column(side).get(index).copied().flatten()
    }

    /// Whether the slot at `index` still holds `card`
    pub fn holds(&self, side: Side, index: usize, card: CardId) -> bool {
        self.slot(side, index).map(|s| s.card) == Some(card)
    }

    /// Put `card` into the slot at `index`, replacing whatever was there
    pub fn place(&mut self, side: Side, index: usize, card: CardId) {
        if let Some(slot) = self.column_mut(side).get_mut(index) {
            *slot = Some(Slot::new(card));
        }
    }

    pub fn clear(&mut self, side: Side, index: usize) {
        if let Some(slot) = self.column_mut(side).get_mut(index) {
            *slot = None;
        }
    }

    pub fn set_fading(&mut self, side: Side, index: usize, fading: bool) {
        if let Some(Some(slot)) = self.column_mut(side).get_mut(index) {
            slot.fading = fading;
        }
    }

    /// Cards shown in a column and not waiting for a refill
    pub fn live_cards(&self, side: Side) -> impl Iterator<Item = CardId> + '_ {
        self.column(side)
            .iter()
            .flatten()
            .filter(|slot| !slot.fading)
            .map(|slot| slot.card)
    }

    pub fn occupied(&self, side: Side) -> usize {
        self.column(side).iter().filter(|slot| slot.is_some()).count()
    }
}
