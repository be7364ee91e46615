//! One-shot deferred tasks on a virtual clock
//!
//! The engine never sleeps. Delayed effects (fade, refill, error clearing) are
//! queued here with a due time and the generation of the session that
//! scheduled them; the engine fires them as its clock is advanced and drops
//! any whose generation no longer matches the live session.

use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::queue::FreedSlots;
use crate::types::CardId;

/// Time the matched pair stays highlighted before it starts fading out
pub const FADE_DELAY_MS: u64 = 300;
/// Fade-out duration before the freed slots change content
pub const REFILL_DELAY_MS: u64 = 250;
/// How long mismatch marks stay visible
pub const ERROR_CLEAR_DELAY_MS: u64 = 400;
/// Timer resolution
pub const TICK_INTERVAL_MS: u64 = 1000;

/// A confirmed match: the left-column card, the right-column card (equal ids
/// unless two duplicate words were paired) and where they sat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub left: CardId,
    pub right: CardId,
    pub freed: FreedSlots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Task {
    /// Highlight is over: drop the correct/fading marks, then refill
    FadeComplete { matched: MatchRecord },
    /// Replace the freed slots
    Refill { matched: MatchRecord },
    /// Drop the mismatch marks
    ClearErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub due_ms: u64,
    /// Scheduling order; breaks ties between equal due times
    pub seq: u64,
    pub generation: u32,
    pub task: Task,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(rename_all = "camelCase")]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Queue `task` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, generation: u32, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            due_ms: self.now_ms + delay_ms,
            seq,
            generation,
            task,
        });
    }

    fn earliest(&self) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(index, _)| index)
    }

    /// Due time of the next task, if any
    pub fn next_due(&self) -> Option<u64> {
        self.earliest().map(|index| self.tasks[index].due_ms)
    }

    /// Remove and return the earliest task due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<ScheduledTask> {
        let index = self.earliest()?;
        if self.tasks[index].due_ms > until_ms {
            return None;
        }
        let task = self.tasks.remove(index);
        self.now_ms = self.now_ms.max(task.due_ms);
        Some(task)
    }

    /// Move the clock forward; never backwards
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Drop tasks scheduled by an older session
    pub fn discard_stale(&mut self, generation: u32) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.generation == generation);
        before - self.tasks.len()
    }
}
