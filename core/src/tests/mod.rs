mod pool;
mod schedule;
mod state;
mod view;

use alloc::format;
use alloc::vec::Vec;

use crate::engine::{MatchEngine, SelectOutcome};
use crate::schedule::{FADE_DELAY_MS, REFILL_DELAY_MS};
use crate::state::{GameConfig, Session};
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// `count` distinct pairs: ("w0", "W0"), ("w1", "W1"), ...
fn distinct_pairs(count: usize) -> Vec<WordPair> {
    (0..count)
        .map(|i| WordPair::new(&format!("w{i}"), &format!("W{i}")))
        .collect()
}

/// Untimed configuration so `advance` never ends the session
fn untimed(card_count: u32, window_size: u32) -> GameConfig {
    GameConfig {
        card_count,
        timer_enabled: false,
        time_limit_seconds: 0,
        window_size,
    }
}

/// Engine playing `card_count` distinct cards in a window of `window_size`.
/// The pool is exactly `card_count` pairs, so every card gets its own text.
fn engine_with_cards(seed: u64, card_count: u32, window_size: u32) -> MatchEngine {
    let mut engine = MatchEngine::new(seed);
    engine
        .start_with_pairs(
            untimed(card_count, window_size),
            distinct_pairs(card_count as usize),
        )
        .expect("session should start");
    engine
}

/// A (left card, right card) pair on the board that the engine will accept
fn find_match(session: &Session) -> Option<(CardId, CardId)> {
    let clickable = |side: Side| -> Vec<CardId> { session.window.live_cards(side).collect() };
    let rights = clickable(Side::Right);
    for left in clickable(Side::Left) {
        let l = session.card(left)?;
        for &right in &rights {
            let r = session.card(right)?;
            if l.same_words(r) {
                return Some((left, right));
            }
        }
    }
    None
}

/// A (left card, right card) pair on the board that does not match
fn find_mismatch(session: &Session) -> Option<(CardId, CardId)> {
    let lefts: Vec<CardId> = session.window.live_cards(Side::Left).collect();
    let rights: Vec<CardId> = session.window.live_cards(Side::Right).collect();
    for &left in &lefts {
        for &right in &rights {
            let (l, r) = (session.card(left)?, session.card(right)?);
            if !l.same_words(r) {
                return Some((left, right));
            }
        }
    }
    None
}

/// Click a left card and then a right card
fn click_pair(engine: &mut MatchEngine, left: CardId, right: CardId) -> SelectOutcome {
    engine.select(left, Side::Left).expect("left card is on the board");
    engine.select(right, Side::Right).expect("right card is on the board")
}

/// Let every outstanding fade and refill run
fn settle(engine: &mut MatchEngine) {
    engine.advance(FADE_DELAY_MS + REFILL_DELAY_MS);
}

/// Match everything, settling whenever the board has no live match.
/// Returns the number of matches made.
fn play_to_end(engine: &mut MatchEngine) -> u32 {
    let mut matches = 0;
    for _ in 0..10_000 {
        if engine.phase().is_terminal() {
            break;
        }
        match find_match(engine.session()) {
            Some((left, right)) => {
                click_pair(engine, left, right);
                matches += 1;
            }
            None => settle(engine),
        }
    }
    matches
}
