//! Shared test utilities for ledger integration tests

#![allow(dead_code)]

use grindlog::ledger::{LedgerManager, LedgerStore};
use grindlog::progress::ProgressTracker;

/// In-memory ledger store for a test
pub fn open_store() -> LedgerStore {
    LedgerManager::open_in_memory()
        .expect("Failed to open in-memory ledger")
        .store()
}

/// Store plus a tracker with the given completion threshold
pub fn store_and_tracker(threshold: i64) -> (LedgerStore, ProgressTracker) {
    let store = open_store();
    let tracker = ProgressTracker::new(store.clone(), threshold);
    (store, tracker)
}

/// Build an owned grid from string literals
pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
