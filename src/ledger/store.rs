//! Write and read operations on the progress ledger.
//!
//! Every public method takes the connection guard once and runs to
//! completion. The `*_on` variants operate on an already-held connection so
//! that multi-step callers (the cycle manager, the import reconciler) can run
//! their whole read-then-append sequence under a single guard.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::db::LedgerDb;
use super::error::Result;
use super::models::{Game, GameSummary, RecordEntry, UserCycle};

/// Read/write surface over the three ledger relations.
#[derive(Clone)]
pub struct LedgerStore {
    db: LedgerDb,
}

impl LedgerStore {
    pub fn new(db: LedgerDb) -> Self {
        Self { db }
    }

    pub(crate) fn db(&self) -> &LedgerDb {
        &self.db
    }

    /// Create a game if it does not exist yet and return its id. Idempotent.
    pub fn create_game(&self, name: &str) -> Result<i64> {
        Self::create_game_on(&self.db.conn(), name)
    }

    pub fn game_id(&self, name: &str) -> Result<Option<i64>> {
        Self::game_id_on(&self.db.conn(), name)
    }

    /// Create a user-cycle if it does not exist yet and return its id.
    /// Idempotent on (username, game, cycle).
    pub fn create_user_cycle(&self, username: &str, game_id: i64, cycle: u32) -> Result<i64> {
        Self::create_user_cycle_on(&self.db.conn(), username, game_id, cycle)
    }

    pub fn append_record(&self, user_cycle_id: i64, date: &str, count: i64) -> Result<()> {
        Self::append_record_on(&self.db.conn(), user_cycle_id, date, count)
    }

    /// All records of a user-cycle, in insertion order.
    pub fn records_for_cycle(&self, user_cycle_id: i64) -> Result<Vec<RecordEntry>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT record_date, count FROM records WHERE user_cycle_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([user_cycle_id], |row| {
            Ok(RecordEntry {
                date: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Count of the last-inserted record of the cycle, 0 if it has none.
    pub fn latest_count(&self, user_cycle_id: i64) -> Result<i64> {
        Self::latest_count_on(&self.db.conn(), user_cycle_id)
    }

    /// Mark a cycle completed. Setting the flag twice is a no-op.
    pub fn complete_cycle(&self, user_cycle_id: i64) -> Result<()> {
        Self::complete_cycle_on(&self.db.conn(), user_cycle_id)
    }

    /// Highest cycle number for (username, game) and its completed flag.
    pub fn latest_cycle(&self, username: &str, game_id: i64) -> Result<Option<(u32, bool)>> {
        Self::latest_cycle_on(&self.db.conn(), username, game_id)
    }

    /// All games, in creation order.
    pub fn list_games(&self) -> Result<Vec<Game>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM games ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Game {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        Ok(games)
    }

    /// Total record count across every cycle of a game.
    pub fn record_count_for_game(&self, game_id: i64) -> Result<i64> {
        Self::record_count_for_game_on(&self.db.conn(), game_id)
    }

    /// User-cycles of a game, grouped by username then ascending cycle —
    /// the row order used by the export renderer.
    pub fn cycles_for_game(&self, game_id: i64) -> Result<Vec<UserCycle>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, username, game_id, cycle, completed, created_at
             FROM user_cycles WHERE game_id = ?1 ORDER BY username, cycle",
        )?;
        let rows = stmt.query_map([game_id], |row| {
            Ok(UserCycle {
                id: row.get(0)?,
                username: row.get(1)?,
                game_id: row.get(2)?,
                cycle: row.get(3)?,
                completed: row.get::<_, i64>(4)? != 0,
                created_at: row.get(5)?,
            })
        })?;
        let mut cycles = Vec::new();
        for row in rows {
            cycles.push(row?);
        }
        Ok(cycles)
    }

    /// Cycle/record/completion totals for one game.
    pub fn game_summary(&self, game_id: i64) -> Result<GameSummary> {
        let conn = self.db.conn();
        let summary = conn.query_row(
            "SELECT COUNT(DISTINCT u.id),
                    COUNT(r.id),
                    COUNT(DISTINCT CASE WHEN u.completed = 1 THEN u.id END)
             FROM user_cycles u
             LEFT JOIN records r ON r.user_cycle_id = u.id
             WHERE u.game_id = ?1",
            [game_id],
            |row| {
                Ok(GameSummary {
                    user_cycles: row.get(0)?,
                    records: row.get(1)?,
                    completed_cycles: row.get(2)?,
                })
            },
        )?;
        Ok(summary)
    }

    // ------------------------------------------------------------------
    // Connection-scoped variants
    // ------------------------------------------------------------------

    pub(crate) fn create_game_on(conn: &Connection, name: &str) -> Result<i64> {
        conn.execute(
            "INSERT OR IGNORE INTO games (name, created_at) VALUES (?1, ?2)",
            params![name, Utc::now().timestamp_millis()],
        )?;
        let id = conn.query_row("SELECT id FROM games WHERE name = ?1", [name], |row| {
            row.get(0)
        })?;
        Ok(id)
    }

    pub(crate) fn game_id_on(conn: &Connection, name: &str) -> Result<Option<i64>> {
        let id = conn
            .query_row("SELECT id FROM games WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(id)
    }

    pub(crate) fn create_user_cycle_on(
        conn: &Connection,
        username: &str,
        game_id: i64,
        cycle: u32,
    ) -> Result<i64> {
        conn.execute(
            "INSERT OR IGNORE INTO user_cycles (username, game_id, cycle, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, game_id, cycle, Utc::now().timestamp_millis()],
        )?;
        let id = conn.query_row(
            "SELECT id FROM user_cycles WHERE username = ?1 AND game_id = ?2 AND cycle = ?3",
            params![username, game_id, cycle],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    pub(crate) fn append_record_on(
        conn: &Connection,
        user_cycle_id: i64,
        date: &str,
        count: i64,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO records (user_cycle_id, record_date, count, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_cycle_id, date, count, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    pub(crate) fn latest_count_on(conn: &Connection, user_cycle_id: i64) -> Result<i64> {
        let count = conn
            .query_row(
                "SELECT count FROM records WHERE user_cycle_id = ?1 ORDER BY id DESC LIMIT 1",
                [user_cycle_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(count.unwrap_or(0))
    }

    pub(crate) fn complete_cycle_on(conn: &Connection, user_cycle_id: i64) -> Result<()> {
        conn.execute(
            "UPDATE user_cycles SET completed = 1 WHERE id = ?1",
            [user_cycle_id],
        )?;
        Ok(())
    }

    pub(crate) fn latest_cycle_on(
        conn: &Connection,
        username: &str,
        game_id: i64,
    ) -> Result<Option<(u32, bool)>> {
        let row = conn
            .query_row(
                "SELECT cycle, completed FROM user_cycles
                 WHERE username = ?1 AND game_id = ?2
                 ORDER BY cycle DESC LIMIT 1",
                params![username, game_id],
                |row| Ok((row.get(0)?, row.get::<_, i64>(1)? != 0)),
            )
            .optional()?;
        Ok(row)
    }

    pub(crate) fn record_count_for_game_on(conn: &Connection, game_id: i64) -> Result<i64> {
        let count = conn.query_row(
            "SELECT COUNT(r.id)
             FROM records r
             JOIN user_cycles u ON r.user_cycle_id = u.id
             WHERE u.game_id = ?1",
            [game_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
