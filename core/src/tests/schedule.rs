use crate::queue::FreedSlots;
use crate::schedule::*;
use crate::types::CardId;

fn fade(card: u32) -> Task {
    Task::FadeComplete {
        matched: MatchRecord {
            left: CardId(card),
            right: CardId(card),
            freed: FreedSlots::both(0, 0),
        },
    }
}

#[test]
fn test_tasks_pop_in_due_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(ERROR_CLEAR_DELAY_MS, 1, Task::ClearErrors);
    scheduler.schedule(FADE_DELAY_MS, 1, fade(0));

    assert_eq!(scheduler.next_due(), Some(FADE_DELAY_MS));
    let first = scheduler.pop_due(1_000).unwrap();
    assert_eq!(first.task, fade(0));
    assert_eq!(scheduler.now_ms(), FADE_DELAY_MS);

    let second = scheduler.pop_due(1_000).unwrap();
    assert_eq!(second.task, Task::ClearErrors);
    assert_eq!(scheduler.now_ms(), ERROR_CLEAR_DELAY_MS);
    assert!(scheduler.pop_due(1_000).is_none());
}

#[test]
fn test_equal_due_times_keep_scheduling_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(100, 1, fade(1));
    scheduler.schedule(100, 1, fade(2));
    scheduler.schedule(100, 1, fade(3));

    let order: alloc::vec::Vec<Task> = core::iter::from_fn(|| scheduler.pop_due(100))
        .map(|t| t.task)
        .collect();
    assert_eq!(order, alloc::vec![fade(1), fade(2), fade(3)]);
}

#[test]
fn test_nothing_pops_before_its_due_time() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(REFILL_DELAY_MS, 1, Task::ClearErrors);

    assert!(scheduler.pop_due(REFILL_DELAY_MS - 1).is_none());
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.now_ms(), 0);
}

#[test]
fn test_delays_are_relative_to_the_clock() {
    let mut scheduler = Scheduler::new();
    scheduler.set_now(5_000);
    scheduler.schedule(FADE_DELAY_MS, 1, Task::ClearErrors);

    assert_eq!(scheduler.next_due(), Some(5_000 + FADE_DELAY_MS));

    scheduler.set_now(10);
    assert_eq!(scheduler.now_ms(), 5_000, "the clock never runs backwards");
}

#[test]
fn test_discard_stale_keeps_only_live_generation() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(10, 1, Task::ClearErrors);
    scheduler.schedule(20, 2, fade(4));
    scheduler.schedule(30, 1, fade(5));

    let dropped = scheduler.discard_stale(2);

    assert_eq!(dropped, 2);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.tasks()[0].generation, 2);
}

#[test]
fn test_stale_tasks_after_restart_are_noops() {
    let mut engine = super::engine_with_cards(51, 8, 5);
    super::click_pair(&mut engine, CardId(0), CardId(0));
    super::click_pair(&mut engine, CardId(1), CardId(2));
    assert_eq!(engine.scheduler().len(), 2);

    engine
        .start_with_pairs(super::untimed(8, 5), super::distinct_pairs(8))
        .unwrap();
    let fresh = engine.session().clone();

    engine.advance(FADE_DELAY_MS + REFILL_DELAY_MS + ERROR_CLEAR_DELAY_MS);

    assert!(engine.scheduler().is_empty());
    assert_eq!(engine.session().window, fresh.window);
    assert_eq!(engine.session().queue, fresh.queue);
    assert_eq!(engine.session().completed, 0);
}
