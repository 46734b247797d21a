//! Progress ledger: durable storage for games, user-cycles and records.
//!
//! Three relations in a single SQLite database:
//!
//! ```text
//! games ──< user_cycles ──< records
//! ```
//!
//! Games and user-cycles are created lazily with get-or-create semantics;
//! records are append-only and never updated or deleted.
//!
//! # Usage
//!
//! ```ignore
//! let ledger = LedgerManager::open(&config.db_path())?;
//! let store = ledger.store();
//!
//! let game = store.create_game("raid")?;
//! let cycle = store.create_user_cycle("alice", game, 1)?;
//! store.append_record(cycle, "5-13", 1)?;
//! ```

mod db;
mod error;
mod models;
mod store;

pub use db::LedgerDb;
pub use error::{LedgerError, Result};
pub use models::{Game, GameSummary, RecordEntry, UserCycle};
pub use store::LedgerStore;

use std::path::Path;

/// Central handle for the ledger database.
///
/// Opened once at startup and passed into the components that need it; there
/// is no process-wide singleton.
#[derive(Clone)]
pub struct LedgerManager {
    db: LedgerDb,
}

impl LedgerManager {
    /// Open or create the ledger at a specific path.
    pub fn open(path: &Path) -> Result<Self> {
        let db = LedgerDb::open(path)?;
        Ok(Self { db })
    }

    /// In-memory ledger, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let db = LedgerDb::open_in_memory()?;
        Ok(Self { db })
    }

    /// Get the read/write surface over the ledger relations.
    pub fn store(&self) -> LedgerStore {
        LedgerStore::new(self.db.clone())
    }
}
