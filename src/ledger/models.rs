//! Data models for the progress ledger.

use serde::{Deserialize, Serialize};

/// A tracked activity with its own independent ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    /// Creation time, ms since epoch
    pub created_at: i64,
}

/// One repetition attempt by one user within one game.
///
/// `(username, game_id, cycle)` is unique. The completed flag transitions
/// false to true exactly once and never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCycle {
    pub id: i64,
    pub username: String,
    pub game_id: i64,
    pub cycle: u32,
    pub completed: bool,
    /// Creation time, ms since epoch
    pub created_at: i64,
}

/// One immutable ledger entry: a free-form "MM-DD" date and the running
/// count within the cycle at the time of writing. Insertion order, not the
/// date string, is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub date: String,
    pub count: i64,
}

/// Per-game totals used by listings and export reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameSummary {
    pub user_cycles: u64,
    pub records: u64,
    pub completed_cycles: u64,
}
