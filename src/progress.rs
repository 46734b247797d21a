//! Cycle management for incremental adds.
//!
//! Resolves which cycle is active for a (username, game) pair, appends the
//! requested increments as dated records, and applies the completion
//! threshold: the moment the running count reaches it the cycle is closed and
//! any remaining increments in the batch are dropped rather than carried into
//! a new cycle.

use chrono::Local;
use tracing::debug;

use crate::ledger::{LedgerError, LedgerStore, RecordEntry, Result};

/// Applies increments to the active cycle of a (username, game) pair.
pub struct ProgressTracker {
    store: LedgerStore,
    threshold: i64,
}

/// What an incremental add actually did. The caller turns this into a
/// human-readable confirmation; the tracker never formats messages.
#[derive(Debug, Clone)]
pub struct ProgressOutcome {
    pub game: String,
    pub username: String,
    pub cycle: u32,
    /// Running count after the last appended record.
    pub final_count: i64,
    /// Records appended by this call, in order.
    pub appended: Vec<RecordEntry>,
    /// True when this call closed the cycle.
    pub completed: bool,
    pub threshold: i64,
}

impl ProgressTracker {
    pub fn new(store: LedgerStore, threshold: i64) -> Self {
        Self { store, threshold }
    }

    /// Add `n` sequential increments for (username, game), dated today.
    ///
    /// The game must already exist; an unknown game fails with
    /// [`LedgerError::GameNotFound`] and mutates nothing. The caller is
    /// responsible for keeping `n` within its accepted range (1..=100).
    ///
    /// The whole read-latest-then-append sequence runs under a single
    /// connection guard, so concurrent in-process callers cannot interleave
    /// on the same pair.
    pub fn add_increments(&self, game: &str, username: &str, n: u32) -> Result<ProgressOutcome> {
        let conn = self.store.db().conn();

        let game_id = LedgerStore::game_id_on(&conn, game)?
            .ok_or_else(|| LedgerError::GameNotFound(game.to_string()))?;

        let cycle = match LedgerStore::latest_cycle_on(&conn, username, game_id)? {
            // Completed latest cycle: the next attempt opens cycle + 1.
            Some((latest, true)) => latest + 1,
            Some((latest, false)) => latest,
            None => 1,
        };
        let cycle_id = LedgerStore::create_user_cycle_on(&conn, username, game_id, cycle)?;
        let mut running = LedgerStore::latest_count_on(&conn, cycle_id)?;

        let today = Local::now().format("%m-%d").to_string();
        let mut appended = Vec::new();
        let mut completed = false;

        for _ in 0..n {
            running += 1;
            LedgerStore::append_record_on(&conn, cycle_id, &today, running)?;
            appended.push(RecordEntry {
                date: today.clone(),
                count: running,
            });
            if running >= self.threshold {
                LedgerStore::complete_cycle_on(&conn, cycle_id)?;
                completed = true;
                // Remaining increments in the batch are discarded.
                break;
            }
        }

        debug!(
            game,
            username,
            cycle,
            running,
            completed,
            "appended {} record(s)",
            appended.len()
        );

        Ok(ProgressOutcome {
            game: game.to_string(),
            username: username.to_string(),
            cycle,
            final_count: running,
            appended,
            completed,
            threshold: self.threshold,
        })
    }
}
