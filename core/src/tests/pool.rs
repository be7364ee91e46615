use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::distinct_pairs;
use crate::error::GameError;
use crate::pool::{create_cards, WordPool};
use crate::rng::XorShiftRng;
use crate::types::*;
use crate::vocabulary::get_all_word_sets;

#[test]
fn test_no_enabled_sets_is_a_configuration_error() {
    let sets = get_all_word_sets();
    let err = WordPool::from_sets(&sets, &[]).unwrap_err();
    assert_eq!(err, GameError::NoEnabledSets);
}

#[test]
fn test_enabled_but_unknown_sets_give_empty_pool() {
    let sets = get_all_word_sets();
    let err = WordPool::from_sets(&sets, &[String::from("nope")]).unwrap_err();
    assert_eq!(err, GameError::EmptyWordPool);
}

#[test]
fn test_sample_returns_exact_count_without_repeats_when_pool_is_large() {
    let pool = WordPool::from_pairs(distinct_pairs(30)).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(3);

    let sample = pool.sample(12, &mut rng);

    assert_eq!(sample.len(), 12);
    let unique: BTreeSet<_> = sample.iter().collect();
    assert_eq!(unique.len(), 12, "a large pool should not repeat pairs");
}

#[test]
fn test_small_pool_is_repeated_to_cover_the_request() {
    let pool = WordPool::from_pairs(distinct_pairs(3)).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(11);

    let sample = pool.sample(10, &mut rng);

    assert_eq!(sample.len(), 10);
    let pool_pairs = distinct_pairs(3);
    assert!(sample.iter().all(|pair| pool_pairs.contains(pair)));
    // 3 * 4 = 12 candidates were shuffled before truncating to 10
    for pair in &pool_pairs {
        let n = sample.iter().filter(|p| *p == pair).count();
        assert!((2..=4).contains(&n), "{pair:?} appeared {n} times");
    }
}

#[test]
fn test_sample_is_deterministic_per_seed() {
    let pool = WordPool::from_pairs(distinct_pairs(20)).unwrap();

    let a = pool.sample(8, &mut XorShiftRng::seed_from_u64(5));
    let b = pool.sample(8, &mut XorShiftRng::seed_from_u64(5));
    let c = pool.sample(8, &mut XorShiftRng::seed_from_u64(6));

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_create_cards_assigns_sequential_ids() {
    let cards = create_cards(vec![
        WordPair::new("kuća", "дом"),
        WordPair::new("kuća", "дом"),
        WordPair::new("voda", "вода"),
    ]);

    let ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CardId(0), CardId(1), CardId(2)]);
    assert_eq!(cards[1].text(Side::Left), "kuća");
    assert_eq!(cards[2].text(Side::Right), "вода");
}

#[test]
fn test_explicit_word_list_is_deduplicated_in_order() {
    let pool = WordPool::from_pairs(vec![
        WordPair::new("kuća", "дом"),
        WordPair::new("voda", "вода"),
        WordPair::new("kuća", "дом"),
        WordPair::new("kuća", "кухня"),
    ])
    .unwrap();
    assert_eq!(pool.len(), 3);

    // Two copies of the pool exactly cover six cards
    let sample = pool.sample(6, &mut XorShiftRng::seed_from_u64(8));
    let houses = sample
        .iter()
        .filter(|p| **p == WordPair::new("kuća", "дом"))
        .count();
    assert_eq!(houses, 2);
}
