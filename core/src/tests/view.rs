use super::*;
use crate::state::GamePhase;
use crate::view::{format_time, GameView};

#[test]
fn test_format_time() {
    assert_eq!(format_time(0), "0:00");
    assert_eq!(format_time(65), "1:05");
    assert_eq!(format_time(599), "9:59");
    assert_eq!(format_time(600), "10:00");
}

#[test]
fn test_game_view_maps_columns_and_marks() {
    let mut engine = engine_with_cards(31, 9, 5);
    click_pair(&mut engine, CardId(0), CardId(0));
    click_pair(&mut engine, CardId(1), CardId(2));

    let session = engine.session();
    let view = GameView::from_session(session);

    assert_eq!(view.phase, "playing");
    assert_eq!(view.completed, 1);
    assert_eq!(view.card_count, 9);
    assert_eq!(view.combo, 0);
    assert_eq!(view.max_combo, 1);
    assert_eq!(view.queued_pairs, 2);
    assert_eq!(view.pending_halves, 0);
    assert!(!view.timer_enabled);

    for (side, column) in [(Side::Left, &view.left), (Side::Right, &view.right)] {
        assert_eq!(column.len(), 5);
        for slot in column.iter().flatten() {
            let card = session.card(slot.id).unwrap();
            assert_eq!(slot.text, card.text(side));
            assert_eq!(slot.fading, slot.id == CardId(0));
            assert_eq!(slot.error, slot.id == CardId(1) || slot.id == CardId(2));
            assert!(!slot.selected);
        }
    }
    assert_eq!(view.error_ids, alloc::vec![CardId(1), CardId(2)]);
}

#[test]
fn test_game_view_timer_labels_and_summary() {
    let mut engine = MatchEngine::new(32);
    let config = GameConfig {
        card_count: 6,
        timer_enabled: true,
        time_limit_seconds: 3,
        window_size: 5,
    };
    engine.start_with_pairs(config, distinct_pairs(6)).unwrap();

    engine.advance(1_000);
    let view = engine.view();
    assert_eq!(view.elapsed_label, "0:01");
    assert_eq!(view.remaining_label, "0:02");
    assert!(view.summary.is_none());

    engine.advance(2_000);
    let view = engine.view();
    assert_eq!(view.phase, GamePhase::Defeat.as_str());
    assert_eq!(view.remaining_label, "0:00");
    assert_eq!(view.summary.map(|s| s.elapsed_seconds), Some(3));
}

#[test]
fn test_setup_view_is_empty() {
    let engine = MatchEngine::new(33);
    let view = engine.view();

    assert_eq!(view.phase, "setup");
    assert_eq!(view.left.len(), 5);
    assert!(view.left.iter().all(Option::is_none));
    assert_eq!(view.selection, None);
}

#[test]
fn test_view_serializes_camel_case() {
    let engine = engine_with_cards(34, 6, 5);
    let json = serde_json::to_string(&engine.view()).unwrap();

    assert!(json.contains("\"maxCombo\":0"));
    assert!(json.contains("\"queuedPairs\":1"));
    assert!(json.contains("\"remainingLabel\""));
    assert!(!json.contains("max_combo"));
}
