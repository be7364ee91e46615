//! Match engine
//!
//! Owns the single live `Session`, its deferred-task scheduler and the RNG.
//! All mutation happens through `start`, `select`, `tick` and `advance`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::log;
use crate::pool::{create_cards, WordPool};
use crate::queue::FreedSlots;
use crate::rng::XorShiftRng;
use crate::schedule::{
    MatchRecord, ScheduledTask, Scheduler, Task, ERROR_CLEAR_DELAY_MS, FADE_DELAY_MS,
    REFILL_DELAY_MS, TICK_INTERVAL_MS,
};
use crate::state::*;
use crate::types::{CardId, Selection, Side, WordPair};
use crate::view::GameView;
use crate::vocabulary::{get_all_word_sets, WordSet};
use crate::window::SlotWindow;

/// What a selection event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SelectOutcome {
    /// No session running, or the card is fading out
    Ignored,
    /// First card of a pair chosen
    Selected,
    /// Same card clicked again
    Deselected,
    /// Another card in the same column replaced the selection
    Reselected,
    /// Correct pair; the refill is scheduled
    Match { completed: u32, combo: u32 },
    /// Wrong pair; combo reset
    Mismatch,
    /// Correct pair and it was the last one
    Victory,
}

/// Everything needed to resume a session after a reload
#[derive(Debug, Clone, Encode, Decode)]
struct EngineSnapshot {
    session: Session,
    scheduler: Scheduler,
    rng: XorShiftRng,
}

pub struct MatchEngine {
    session: Session,
    scheduler: Scheduler,
    rng: XorShiftRng,
    vocabulary: Vec<WordSet>,
}

impl MatchEngine {
    /// Engine over the built-in vocabulary
    pub fn new(seed: u64) -> Self {
        Self::with_vocabulary(seed, get_all_word_sets())
    }

    pub fn with_vocabulary(seed: u64, vocabulary: Vec<WordSet>) -> Self {
        log::info("=== WORDMATCH ENGINE INITIALIZED ===");
        Self {
            session: Session::new(0),
            scheduler: Scheduler::new(),
            rng: XorShiftRng::seed_from_u64(seed),
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &[WordSet] {
        &self.vocabulary
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.session.summary
    }

    pub fn view(&self) -> GameView {
        GameView::from_session(&self.session)
    }

    /// Start a new session from the enabled vocabulary sets.
    ///
    /// On error the current session is left untouched.
    pub fn start(&mut self, config: GameConfig, enabled_sets: &[String]) -> GameResult<()> {
        log::action(
            "start",
            &format!(
                "cards={}, timer={}, limit={}s, sets={:?}",
                config.card_count, config.timer_enabled, config.time_limit_seconds, enabled_sets
            ),
        );
        config.validate()?;
        let pool = WordPool::from_sets(&self.vocabulary, enabled_sets)?;
        self.begin(config, &pool);
        Ok(())
    }

    /// Start a new session from an explicit word list
    pub fn start_with_pairs(&mut self, config: GameConfig, pairs: Vec<WordPair>) -> GameResult<()> {
        log::action("start_with_pairs", &format!("pairs={}", pairs.len()));
        config.validate()?;
        let pool = WordPool::from_pairs(pairs)?;
        self.begin(config, &pool);
        Ok(())
    }

    /// Play again with the current configuration
    pub fn restart(&mut self, enabled_sets: &[String]) -> GameResult<()> {
        let config = self.session.config;
        self.start(config, enabled_sets)
    }

    /// Leave the running session and return to setup
    pub fn abandon(&mut self) {
        log::action("abandon", "Returning to setup");
        let config = self.session.config;
        let mut idle = Session::new(self.session.generation + 1);
        idle.window = SlotWindow::empty(config.window_size as usize);
        idle.config = config;
        self.session = idle;
    }

    /// Handle a click on `card` in the `side` column
    pub fn select(&mut self, card: CardId, side: Side) -> GameResult<SelectOutcome> {
        log::action("select", &format!("card={card}, side={}", side.as_str()));
        if self.session.phase != GamePhase::Playing {
            return Ok(SelectOutcome::Ignored);
        }

        let index = self
            .session
            .window
            .position(side, card)
            .ok_or(GameError::CardNotInColumn { id: card, side })?;
        let slot_fading = self
            .session
            .window
            .slot(side, index)
            .map(|slot| slot.fading)
            .unwrap_or(false);
        if slot_fading {
            return Ok(SelectOutcome::Ignored);
        }

        self.session.error_ids.clear();
        self.session.correct_ids.clear();

        let clicked = Selection { card, side };
        let outcome = match self.session.selection {
            None => {
                self.session.selection = Some(clicked);
                SelectOutcome::Selected
            }
            Some(previous) if previous == clicked => {
                self.session.selection = None;
                SelectOutcome::Deselected
            }
            Some(previous) if previous.side == side => {
                self.session.selection = Some(clicked);
                SelectOutcome::Reselected
            }
            Some(previous) => self.resolve_pair(previous, clicked),
        };

        self.log_state();
        self.assert_invariants();
        Ok(outcome)
    }

    /// Compare the two selected cards across columns
    fn resolve_pair(&mut self, previous: Selection, clicked: Selection) -> SelectOutcome {
        self.session.selection = None;

        let (left, right) = match clicked.side {
            Side::Right => (previous.card, clicked.card),
            Side::Left => (clicked.card, previous.card),
        };
        let positions = (
            self.session.window.position(Side::Left, left),
            self.session.window.position(Side::Right, right),
        );
        let (Some(left_index), Some(right_index)) = positions else {
            // The earlier pick left the board; start over from this click
            log::warn("resolve_pair: previous selection is no longer on the board");
            self.session.selection = Some(clicked);
            return SelectOutcome::Selected;
        };

        if !self.texts_match(left, right) {
            log::debug("resolve_pair", &format!("mismatch {left} / {right}"));
            self.session.error_ids.insert(previous.card);
            self.session.error_ids.insert(clicked.card);
            self.session.combo = 0;
            self.scheduler
                .schedule(ERROR_CLEAR_DELAY_MS, self.session.generation, Task::ClearErrors);
            return SelectOutcome::Mismatch;
        }

        let session = &mut self.session;
        session.fading_ids.insert(left);
        session.fading_ids.insert(right);
        session.correct_ids.insert(left);
        session.correct_ids.insert(right);
        session.window.set_fading(Side::Left, left_index, true);
        session.window.set_fading(Side::Right, right_index, true);
        session.matched_left.insert(left);
        session.matched_right.insert(right);
        session.completed += 1;
        session.combo += 1;
        session.max_combo = session.max_combo.max(session.combo);

        if session.completed >= session.card_count() {
            self.finish(Outcome::Victory);
            return SelectOutcome::Victory;
        }

        let matched = MatchRecord {
            left,
            right,
            freed: FreedSlots::both(left_index, right_index),
        };
        self.scheduler.schedule(
            FADE_DELAY_MS,
            self.session.generation,
            Task::FadeComplete { matched },
        );
        SelectOutcome::Match {
            completed: self.session.completed,
            combo: self.session.combo,
        }
    }

    /// The two cards carry the same translation pair. Literal duplicates with
    /// different ids are interchangeable, so they match in both directions.
    fn texts_match(&self, left: CardId, right: CardId) -> bool {
        match (self.session.card(left), self.session.card(right)) {
            (Some(l), Some(r)) => l.same_words(r),
            _ => false,
        }
    }

    /// Apply one timer tick. Returns false when no session is running.
    pub fn tick(&mut self) -> bool {
        if self.session.phase != GamePhase::Playing {
            return false;
        }
        self.session.elapsed_seconds += 1;
        if self.session.config.timer_enabled {
            self.session.remaining_seconds = self.session.remaining_seconds.saturating_sub(1);
            if self.session.remaining_seconds == 0 {
                log::info("Time is up");
                self.finish(Outcome::Defeat);
            }
        }
        true
    }

    /// Move the virtual clock forward by `elapsed_ms`, firing timer ticks and
    /// scheduled tasks in time order. A tick due at the same instant as a task
    /// fires first.
    ///
    /// Hosts that drive `advance` must not also call `tick` themselves.
    pub fn advance(&mut self, elapsed_ms: u64) {
        let target = self.scheduler.now_ms() + elapsed_ms;
        loop {
            let tick_due = Some(self.session.next_tick_ms)
                .filter(|&due| self.session.phase == GamePhase::Playing && due <= target);
            let task_due = self.scheduler.next_due().filter(|&due| due <= target);

            let fire_tick = match (tick_due, task_due) {
                (Some(tick), Some(task)) => tick <= task,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };

            if fire_tick {
                self.scheduler.set_now(self.session.next_tick_ms);
                self.session.next_tick_ms += TICK_INTERVAL_MS;
                self.tick();
            } else if let Some(task) = self.scheduler.pop_due(target) {
                self.run_task(task);
            }
        }
        self.scheduler.set_now(target);
    }

    fn run_task(&mut self, scheduled: ScheduledTask) {
        if scheduled.generation != self.session.generation {
            log::debug(
                "run_task",
                &format!(
                    "dropping stale task from generation {} (live {})",
                    scheduled.generation, self.session.generation
                ),
            );
            return;
        }
        if self.session.phase != GamePhase::Playing {
            return;
        }

        match scheduled.task {
            Task::ClearErrors => {
                self.session.error_ids.clear();
            }
            Task::FadeComplete { matched } => {
                self.session.fading_ids.remove(&matched.left);
                self.session.fading_ids.remove(&matched.right);
                self.session.correct_ids.remove(&matched.left);
                self.session.correct_ids.remove(&matched.right);
                self.scheduler.schedule(
                    REFILL_DELAY_MS,
                    self.session.generation,
                    Task::Refill { matched },
                );
            }
            Task::Refill { matched } => self.refill(matched),
        }
        self.assert_invariants();
    }

    /// Replace the slots freed by `matched`
    fn refill(&mut self, matched: MatchRecord) {
        let window = &self.session.window;
        let still_there = |side: Side, card: CardId| {
            matched.freed.get(side).filter(|&index| {
                window.holds(side, index, card)
                    && window.slot(side, index).map(|s| s.fading).unwrap_or(false)
            })
        };
        let freed = FreedSlots {
            left: still_there(Side::Left, matched.left).map(|i| i as u32),
            right: still_there(Side::Right, matched.right).map(|i| i as u32),
        };
        if freed != matched.freed {
            debug_assert!(false, "freed slot changed before its refill: {matched:?}");
            log::warn(&format!("refill: freed slot changed before refill {matched:?}"));
        }

        let refill = self.session.queue.refill(&mut self.session.window, freed);
        log::debug("refill", &format!("{refill:?}"));
        self.log_state();
    }

    fn finish(&mut self, outcome: Outcome) {
        let session = &mut self.session;
        if session.phase.is_terminal() {
            return;
        }
        session.phase = match outcome {
            Outcome::Victory => GamePhase::Victory,
            Outcome::Defeat => GamePhase::Defeat,
        };
        session.selection = None;
        session.summary = Some(GameSummary {
            outcome,
            elapsed_seconds: session.elapsed_seconds,
            completed: session.completed,
            card_count: session.card_count(),
            max_combo: session.max_combo,
        });
        log::info(&format!("Session over: {:?}", session.summary));
    }

    fn begin(&mut self, config: GameConfig, pool: &WordPool) {
        let words = pool.sample(config.card_count as usize, &mut self.rng);
        let cards = create_cards(words);
        let generation = self.session.generation + 1;
        self.session = Session::start(
            generation,
            config,
            cards,
            &mut self.rng,
            self.scheduler.now_ms(),
        );
        log::info(&format!(
            "Session {generation} started: pool={}, queued pairs={}",
            pool.len(),
            self.session.queue.pairs().len()
        ));
        self.log_state();
        self.assert_invariants();
    }

    /// SCALE-encoded session, pending tasks and RNG state
    pub fn snapshot(&self) -> Vec<u8> {
        let mut scheduler = self.scheduler.clone();
        scheduler.discard_stale(self.session.generation);
        EngineSnapshot {
            session: self.session.clone(),
            scheduler,
            rng: self.rng.clone(),
        }
        .encode()
    }

    /// Resume from `snapshot` bytes. On error the engine is left untouched.
    pub fn restore(&mut self, bytes: &[u8]) -> GameResult<()> {
        log::action("restore", &format!("{} bytes", bytes.len()));
        let snapshot =
            EngineSnapshot::decode(&mut &bytes[..]).map_err(|_| GameError::SnapshotDecode)?;
        snapshot.session.verify_invariants()?;
        self.session = snapshot.session;
        self.scheduler = snapshot.scheduler;
        self.rng = snapshot.rng;
        Ok(())
    }

    fn log_state(&self) {
        let session = &self.session;
        log::session_summary(
            session.phase.as_str(),
            session.completed,
            session.card_count(),
            session.combo,
            session.queue.pairs().len(),
            session.queue.pending().len(),
        );
    }

    fn assert_invariants(&self) {
        #[cfg(debug_assertions)]
        if self.session.phase != GamePhase::Setup {
            if let Err(e) = self.session.verify_invariants() {
                panic!("{e}");
            }
        }
    }
}
