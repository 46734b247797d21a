//! Spreadsheet import: workbook reading and the grid reconciler.
//!
//! A spreadsheet is read into a plain row-major grid of strings, then merged
//! into the ledger row by row. Column 1 of every row is an identity cell,
//! the remaining columns are record cells. Undecodable record cells are
//! skipped, never fatal: bulk imports must survive dirty data.

mod reader;

pub use reader::{find_file, game_name_for, list_files, read_grid};

use tracing::{debug, info};

use crate::codec;
use crate::ledger::{LedgerStore, Result};

/// Merges a parsed spreadsheet grid into the ledger.
pub struct Reconciler {
    store: LedgerStore,
    threshold: i64,
}

/// Before/after totals for one import.
///
/// Purely informational: the comparison distinguishes a first import from a
/// re-import but never suppresses writes — importing the same sheet twice
/// appends every record twice.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub game: String,
    /// Whether the game existed before this import.
    pub existing_game: bool,
    pub records_before: i64,
    pub records_after: i64,
    /// records_after - records_before
    pub new_records: i64,
    /// Record cells successfully decoded and appended.
    pub imported: u64,
    /// Rows with a usable identity cell.
    pub rows: u64,
    /// Record cells seen, including skipped ones.
    pub cells: u64,
}

impl Reconciler {
    pub fn new(store: LedgerStore, threshold: i64) -> Self {
        Self { store, threshold }
    }

    /// Import a grid into the named game, creating the game and any
    /// user-cycles on first sight.
    ///
    /// A row's identity cell decides (username, cycle); every following cell
    /// either decodes into a record or is skipped. A record at or above the
    /// completion threshold closes its cycle no matter where in the row it
    /// sits.
    pub fn import_grid(&self, game_name: &str, grid: &[Vec<String>]) -> Result<ImportReport> {
        let conn = self.store.db().conn();

        let existing = LedgerStore::game_id_on(&conn, game_name)?;
        let game_id = match existing {
            Some(id) => id,
            None => LedgerStore::create_game_on(&conn, game_name)?,
        };
        let records_before = LedgerStore::record_count_for_game_on(&conn, game_id)?;

        let mut report = ImportReport {
            game: game_name.to_string(),
            existing_game: existing.is_some(),
            records_before,
            ..Default::default()
        };

        for row in grid {
            let Some(identity) = row.first() else { continue };
            if identity.trim().is_empty() {
                continue;
            }
            let (username, cycle) = codec::decode_identity(identity);
            let cycle_id = LedgerStore::create_user_cycle_on(&conn, &username, game_id, cycle)?;
            report.rows += 1;

            for cell in &row[1..] {
                report.cells += 1;
                match codec::decode_record(cell) {
                    Some((date, count)) => {
                        LedgerStore::append_record_on(&conn, cycle_id, &date, count)?;
                        report.imported += 1;
                        if count >= self.threshold {
                            LedgerStore::complete_cycle_on(&conn, cycle_id)?;
                        }
                    }
                    None => {
                        if !cell.trim().is_empty() {
                            debug!(
                                cell = cell.as_str(),
                                username = username.as_str(),
                                "skipping undecodable cell"
                            );
                        }
                    }
                }
            }
        }

        report.records_after = LedgerStore::record_count_for_game_on(&conn, game_id)?;
        report.new_records = report.records_after - report.records_before;

        info!(
            game = game_name,
            rows = report.rows,
            imported = report.imported,
            new_records = report.new_records,
            "import finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerDb;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn reconciler() -> (Reconciler, LedgerStore) {
        let store = LedgerStore::new(LedgerDb::open_in_memory().unwrap());
        (Reconciler::new(store.clone(), 30), store)
    }

    #[test]
    fn imports_rows_and_creates_identities() {
        let (reconciler, store) = reconciler();
        let grid = grid(&[
            &["alice", "5-13_1", "5-14_2"],
            &["alice(2)", "5-20_1"],
            &["bob", "5-13_1"],
        ]);

        let report = reconciler.import_grid("raid", &grid).unwrap();
        assert!(!report.existing_game);
        assert_eq!(report.rows, 3);
        assert_eq!(report.imported, 4);
        assert_eq!(report.new_records, 4);

        let game = store.game_id("raid").unwrap().unwrap();
        let cycles = store.cycles_for_game(game).unwrap();
        assert_eq!(cycles.len(), 3);
        assert_eq!(store.latest_cycle("alice", game).unwrap(), Some((2, false)));
    }

    #[test]
    fn bad_cells_are_skipped_not_fatal() {
        let (reconciler, store) = reconciler();
        let grid = grid(&[&["alice", "garbage", "5-13_1", "无", "", "5-14_x", "5-14_2"]]);

        let report = reconciler.import_grid("raid", &grid).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.cells, 6);

        let game = store.game_id("raid").unwrap().unwrap();
        let cycle = store.create_user_cycle("alice", game, 1).unwrap();
        let counts: Vec<i64> = store
            .records_for_cycle(cycle)
            .unwrap()
            .iter()
            .map(|r| r.count)
            .collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn threshold_anywhere_in_row_completes_cycle() {
        let (reconciler, store) = reconciler();
        // The closing record is not the last cell of the row.
        let grid = grid(&[&["alice", "5-13_30(续)", "5-14_2"]]);

        reconciler.import_grid("raid", &grid).unwrap();
        let game = store.game_id("raid").unwrap().unwrap();
        assert_eq!(store.latest_cycle("alice", game).unwrap(), Some((1, true)));
    }

    #[test]
    fn reimport_appends_again() {
        // No deduplication: the comparison report only counts totals.
        let (reconciler, _) = reconciler();
        let grid = grid(&[&["alice", "5-13_1", "5-14_2"]]);

        let first = reconciler.import_grid("raid", &grid).unwrap();
        assert!(!first.existing_game);
        assert_eq!(first.new_records, 2);

        let second = reconciler.import_grid("raid", &grid).unwrap();
        assert!(second.existing_game);
        assert_eq!(second.records_before, 2);
        assert_eq!(second.records_after, 4);
        assert_eq!(second.new_records, 2);
    }

    #[test]
    fn rows_without_identity_are_ignored() {
        let (reconciler, _) = reconciler();
        let grid = grid(&[&["", "5-13_1"], &["  ", "5-13_2"], &[]]);
        let report = reconciler.import_grid("raid", &grid).unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(report.imported, 0);
    }
}
