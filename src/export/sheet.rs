//! Pure grid rendering: ledger rows -> spreadsheet-shaped cells.

use std::collections::HashSet;

use crate::codec;
use crate::ledger::{Game, LedgerStore, Result};

/// Excel refuses sheet names longer than this.
pub const SHEET_NAME_MAX: usize = 31;

/// One spreadsheet row: the identity cell plus its record cells.
#[derive(Debug, Clone, Default)]
pub struct RenderedRow {
    pub identity: String,
    pub cells: Vec<String>,
    /// Completed cycles get the closure tint on every record cell.
    pub completed: bool,
}

/// A full sheet for one game. A game with no user-cycles renders with zero
/// rows; only row geometry is written for it.
#[derive(Debug, Clone, Default)]
pub struct RenderedSheet {
    pub game: String,
    pub rows: Vec<RenderedRow>,
}

/// Project one game's ledger into a sheet: rows grouped by username, cycles
/// ascending, records in insertion order.
pub fn render_game(store: &LedgerStore, game: &Game) -> Result<RenderedSheet> {
    let mut rows = Vec::new();
    for cycle in store.cycles_for_game(game.id)? {
        let records = store.records_for_cycle(cycle.id)?;
        rows.push(RenderedRow {
            identity: codec::encode_identity(&cycle.username, cycle.cycle),
            cells: records
                .iter()
                .map(|r| codec::encode_record(&r.date, r.count))
                .collect(),
            completed: cycle.completed,
        });
    }
    Ok(RenderedSheet {
        game: game.name.clone(),
        rows,
    })
}

/// Replace the characters Excel forbids in sheet names and cap the length.
pub fn sanitize_sheet_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            ':' | '\\' | '/' | '?' | '*' | '[' | ']' => '_',
            c => c,
        })
        .collect();
    safe.chars().take(SHEET_NAME_MAX).collect()
}

/// Keep sanitized names unique within one workbook by numbering clashes
/// (`name_2`, `name_3`, ...) inside the length cap.
pub fn disambiguate_sheet_name(name: String, used: &mut HashSet<String>) -> String {
    if used.insert(name.clone()) {
        return name;
    }
    let mut n = 2;
    loop {
        let suffix = format!("_{n}");
        let keep = SHEET_NAME_MAX.saturating_sub(suffix.chars().count());
        let base: String = name.chars().take(keep).collect();
        let candidate = format!("{base}{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
