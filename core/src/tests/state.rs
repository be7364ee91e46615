use alloc::collections::BTreeSet;

use super::distinct_pairs;
use crate::error::GameError;
use crate::pool::create_cards;
use crate::queue::ReplenishmentQueue;
use crate::rng::XorShiftRng;
use crate::state::*;
use crate::types::*;
use crate::window::SlotWindow;

fn started(card_count: usize, window_size: u32) -> Session {
    let config = GameConfig {
        card_count: card_count as u32,
        window_size,
        ..GameConfig::default()
    };
    let cards = create_cards(distinct_pairs(card_count));
    let mut rng = XorShiftRng::seed_from_u64(7);
    Session::start(1, config, cards, &mut rng, 0)
}

#[test]
fn test_default_config_matches_setup_screen() {
    let config = GameConfig::default();
    assert_eq!(config.card_count, 60);
    assert!(config.timer_enabled);
    assert_eq!(config.time_limit_seconds, 120);
    assert_eq!(config.window_size, WINDOW_SIZE);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_config_validation() {
    let mut config = GameConfig::default();
    config.card_count = 0;
    assert_eq!(
        config.validate(),
        Err(GameError::InvalidCardCount { count: 0 })
    );

    let mut config = GameConfig::default();
    config.window_size = 1;
    assert_eq!(
        config.validate(),
        Err(GameError::InvalidWindowSize { size: 1 })
    );

    let mut config = GameConfig::default();
    config.card_count = 1;
    config.time_limit_seconds = 0;
    assert_eq!(config.validate(), Ok(()), "a zero time limit is allowed");
}

#[test]
fn test_steppers_respect_floors() {
    let mut config = GameConfig::default();

    config.increase_card_count();
    assert_eq!(config.card_count, 70);
    for _ in 0..20 {
        config.decrease_card_count();
    }
    assert_eq!(config.card_count, CARD_COUNT_STEP);

    config.increase_time_limit();
    assert_eq!(config.time_limit_seconds, 125);
    for _ in 0..40 {
        config.decrease_time_limit();
    }
    assert_eq!(config.time_limit_seconds, TIME_LIMIT_STEP);
}

#[test]
fn test_new_session_is_idle() {
    let session = Session::new(3);
    assert_eq!(session.phase, GamePhase::Setup);
    assert_eq!(session.generation, 3);
    assert_eq!(session.card_count(), 0);
    assert_eq!(session.window.size(), WINDOW_SIZE as usize);
    assert_eq!(session.verify_invariants(), Ok(()));
}

#[test]
fn test_start_splits_window_and_backlog() {
    let session = started(12, 5);

    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(session.remaining_seconds, 120);
    assert_eq!(session.next_tick_ms, 1000);

    for side in Side::BOTH {
        let shown: BTreeSet<CardId> = session.window.live_cards(side).collect();
        assert_eq!(shown, (0..5).map(CardId).collect());
    }
    assert_eq!(
        session.queue,
        ReplenishmentQueue::from_backlog(&[5, 6, 7, 8, 9, 10, 11].map(CardId))
    );
    assert_eq!(session.verify_invariants(), Ok(()));
}

#[test]
fn test_phase_helpers() {
    assert_eq!(GamePhase::Setup.as_str(), "setup");
    assert_eq!(GamePhase::Defeat.as_str(), "defeat");
    assert!(GamePhase::Victory.is_terminal());
    assert!(GamePhase::Defeat.is_terminal());
    assert!(!GamePhase::Playing.is_terminal());
}

#[test]
fn test_invariants_catch_a_lost_card() {
    let mut session = started(8, 5);
    let index = session.window.position(Side::Left, CardId(2)).unwrap();
    session.window.clear(Side::Left, index);

    assert!(matches!(
        session.verify_invariants(),
        Err(GameError::InvariantViolation { .. })
    ));
}

#[test]
fn test_invariants_catch_a_duplicated_card() {
    let mut session = started(8, 5);
    let index = session.window.position(Side::Right, CardId(4)).unwrap();
    session.window.place(Side::Right, index, CardId(3));

    assert!(matches!(
        session.verify_invariants(),
        Err(GameError::InvariantViolation { .. })
    ));
}

#[test]
fn test_invariants_catch_a_resized_column() {
    let mut session = started(8, 5);
    session.window = SlotWindow::empty(4);

    assert!(matches!(
        session.verify_invariants(),
        Err(GameError::InvariantViolation { .. })
    ));
}
