//! Typed failures for ledger operations.

use thiserror::Error;

/// Error type for ledger operations.
///
/// Storage faults are fatal for the single operation in progress and are
/// never retried or flattened into strings; callers can tell "unknown game"
/// apart from "the database broke".
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
