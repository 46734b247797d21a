//! Integration tests for the incremental-add flow: registry dispatch,
//! cycle rollover and the completion threshold.

mod common;

use chrono::Local;

use grindlog::ledger::LedgerError;
use grindlog::registry::GameRegistry;

use common::store_and_tracker;

#[test]
fn test_threshold_scenario_end_to_end() {
    // Threshold 30, empty game, "alice": four single increments, then one
    // batch of 30, then one more single increment.
    let (store, tracker) = store_and_tracker(30);
    store.create_game("G").unwrap();

    let mut registry = GameRegistry::new();
    registry.refresh(&store).unwrap();

    let today = Local::now().format("%m-%d").to_string();

    for expected in 1..=4 {
        let outcome = registry.dispatch(&tracker, "G", "alice", 1).unwrap();
        assert_eq!(outcome.final_count, expected);
        assert_eq!(outcome.appended.len(), 1);
        assert_eq!(outcome.appended[0].date, today);
        assert!(!outcome.completed);
    }

    let game = store.game_id("G").unwrap().unwrap();
    let cycle = store.create_user_cycle("alice", game, 1).unwrap();
    let counts: Vec<i64> = store
        .records_for_cycle(cycle)
        .unwrap()
        .iter()
        .map(|r| r.count)
        .collect();
    assert_eq!(counts, vec![1, 2, 3, 4]);

    // A batch of 30 only advances to the threshold, then the cycle closes.
    let outcome = registry.dispatch(&tracker, "G", "alice", 30).unwrap();
    assert_eq!(outcome.final_count, 30);
    assert_eq!(outcome.appended.len(), 26);
    assert!(outcome.completed);
    assert_eq!(store.latest_cycle("alice", game).unwrap(), Some((1, true)));

    // The next increment opens cycle 2 at count 1.
    let outcome = registry.dispatch(&tracker, "G", "alice", 1).unwrap();
    assert_eq!(outcome.cycle, 2);
    assert_eq!(outcome.final_count, 1);
    assert_eq!(store.latest_cycle("alice", game).unwrap(), Some((2, false)));
}

#[test]
fn test_crossing_threshold_mid_batch_writes_one_record() {
    let (store, tracker) = store_and_tracker(30);
    store.create_game("G").unwrap();
    tracker.add_increments("G", "alice", 29).unwrap();

    let outcome = tracker.add_increments("G", "alice", 10).unwrap();
    assert_eq!(outcome.appended.len(), 1);
    assert_eq!(outcome.appended[0].count, 30);
    assert!(outcome.completed);

    // The discarded increments did not leak into a new cycle.
    let game = store.game_id("G").unwrap().unwrap();
    assert_eq!(store.latest_cycle("alice", game).unwrap(), Some((1, true)));
    assert_eq!(store.record_count_for_game(game).unwrap(), 30);
}

#[test]
fn test_rollover_starts_from_zero() {
    let (store, tracker) = store_and_tracker(5);
    store.create_game("G").unwrap();

    tracker.add_increments("G", "alice", 5).unwrap();
    let outcome = tracker.add_increments("G", "alice", 2).unwrap();

    assert_eq!(outcome.cycle, 2);
    let counts: Vec<i64> = outcome.appended.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![1, 2]);

    let game = store.game_id("G").unwrap().unwrap();
    let cycle2 = store.create_user_cycle("alice", game, 2).unwrap();
    assert_eq!(store.latest_count(cycle2).unwrap(), 2);
}

#[test]
fn test_dispatch_unknown_game_reports_without_writing() {
    let (store, tracker) = store_and_tracker(30);
    store.create_game("G").unwrap();

    let mut registry = GameRegistry::new();
    registry.refresh(&store).unwrap();

    let err = registry
        .dispatch(&tracker, "unknown", "alice", 1)
        .unwrap_err();
    assert!(matches!(err, LedgerError::GameNotFound(name) if name == "unknown"));

    let game = store.game_id("G").unwrap().unwrap();
    assert_eq!(store.record_count_for_game(game).unwrap(), 0);
}

#[test]
fn test_registry_picks_up_imported_games() {
    let (store, tracker) = store_and_tracker(30);
    let mut registry = GameRegistry::new();
    registry.refresh(&store).unwrap();
    assert!(registry.is_empty());

    let reconciler = grindlog::import::Reconciler::new(store.clone(), 30);
    reconciler
        .import_grid("G", &common::grid(&[&["alice", "5-13_1"]]))
        .unwrap();

    registry.refresh(&store).unwrap();
    assert!(registry.contains("G"));
    let outcome = registry.dispatch(&tracker, "G", "alice", 1).unwrap();
    assert_eq!(outcome.final_count, 2);
}
