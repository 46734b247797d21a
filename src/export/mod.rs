//! Spreadsheet export: project the ledger back into xlsx files.
//!
//! A game exports as one sheet: identities in column A with a fixed tint,
//! records in the following columns, completed rows tinted across their
//! record cells. "Export all" puts every game on its own sheet of a single
//! workbook. Output files are timestamped and written under the export
//! directory; prior exports are never touched.

mod sheet;
mod writer;

pub use sheet::{
    disambiguate_sheet_name, render_game, sanitize_sheet_name, RenderedRow, RenderedSheet,
    SHEET_NAME_MAX,
};
pub use writer::SheetLayout;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Local;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::ledger::{GameSummary, LedgerError, LedgerStore};

/// Writes ledger contents out as xlsx workbooks.
pub struct ExportRenderer {
    store: LedgerStore,
    layout: SheetLayout,
    export_dir: PathBuf,
}

/// What a single-game export produced.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub game: String,
    pub summary: GameSummary,
    pub file: PathBuf,
}

/// What an export-all produced: one workbook, one sheet per game.
#[derive(Debug, Clone)]
pub struct AllGamesReport {
    pub file: PathBuf,
    pub games: Vec<(String, GameSummary)>,
}

impl ExportRenderer {
    pub fn new(store: LedgerStore, layout: SheetLayout, export_dir: PathBuf) -> Self {
        Self {
            store,
            layout,
            export_dir,
        }
    }

    /// Export one game to `{game}_export_{MM-DD-HHMM}.xlsx`.
    pub fn export_game(&self, name: &str) -> Result<ExportReport> {
        let game = self
            .store
            .list_games()?
            .into_iter()
            .find(|g| g.name == name)
            .ok_or_else(|| LedgerError::GameNotFound(name.to_string()))?;

        let rendered = render_game(&self.store, &game)?;
        let summary = self.store.game_summary(game.id)?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sanitize_sheet_name(&game.name))?;
        writer::write_sheet(worksheet, &rendered, &self.layout)?;

        let file = self.timestamped_path(&format!("{}_export", game.name))?;
        workbook.save(&file)?;

        info!(game = name, file = %file.display(), "exported game");
        Ok(ExportReport {
            game: game.name,
            summary,
            file,
        })
    }

    /// Export every game into one workbook, sheets in game creation order.
    /// Sheet names are sanitized and numbered on collision.
    pub fn export_all(&self) -> Result<AllGamesReport> {
        let games = self.store.list_games()?;
        if games.is_empty() {
            bail!("the ledger has no games to export");
        }

        let mut workbook = Workbook::new();
        let mut used_names = HashSet::new();
        let mut exported = Vec::new();

        for game in &games {
            let rendered = render_game(&self.store, game)?;
            let sheet_name =
                disambiguate_sheet_name(sanitize_sheet_name(&game.name), &mut used_names);
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet_name)?;
            writer::write_sheet(worksheet, &rendered, &self.layout)?;
            exported.push((game.name.clone(), self.store.game_summary(game.id)?));
        }

        let file = self.timestamped_path("all_games_export")?;
        workbook.save(&file)?;

        info!(games = exported.len(), file = %file.display(), "exported all games");
        Ok(AllGamesReport {
            file,
            games: exported,
        })
    }

    fn timestamped_path(&self, stem: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.export_dir)?;
        let timestamp = Local::now().format("%m-%d-%H%M");
        Ok(self.export_dir.join(format!("{stem}_{timestamp}.xlsx")))
    }
}
