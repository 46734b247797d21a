//! Spreadsheet export command.

use anyhow::Result;

use grindlog::config::Config;
use grindlog::export::{ExportRenderer, SheetLayout};
use grindlog::ledger::{LedgerError, LedgerManager};

/// Export one game or every game, or list exportable games when none is
/// named.
pub fn export_command(config: &Config, game: Option<&str>) -> Result<()> {
    let Some(game) = game else {
        return list_exportable(config);
    };

    let ledger = LedgerManager::open(&config.db_path())?;
    let renderer = ExportRenderer::new(
        ledger.store(),
        SheetLayout {
            row_height: config.row_height,
            name_column_width: config.name_column_width,
        },
        config.export_dir(),
    );

    if game.eq_ignore_ascii_case("all") {
        let report = renderer.export_all()?;
        println!("Exported {} game(s) to {}", report.games.len(), report.file.display());
        for (name, summary) in &report.games {
            println!(
                "  {} ({} user-cycles, {} records, {} completed)",
                name, summary.user_cycles, summary.records, summary.completed_cycles
            );
        }
        return Ok(());
    }

    match renderer.export_game(game) {
        Ok(report) => {
            println!("Exported '{}' to {}", report.game, report.file.display());
            println!(
                "  {} user-cycles, {} records, {} completed",
                report.summary.user_cycles, report.summary.records, report.summary.completed_cycles
            );
            Ok(())
        }
        Err(err) => match err.downcast_ref::<LedgerError>() {
            Some(LedgerError::GameNotFound(name)) => {
                println!("Game '{name}' is not in the ledger. See: grindlog games");
                Ok(())
            }
            _ => Err(err),
        },
    }
}

fn list_exportable(config: &Config) -> Result<()> {
    let ledger = LedgerManager::open(&config.db_path())?;
    let store = ledger.store();
    let games = store.list_games()?;

    if games.is_empty() {
        println!("The ledger has no games yet.");
        return Ok(());
    }

    println!("Exportable games:");
    for game in games.iter().take(config.query_limit) {
        let summary = store.game_summary(game.id)?;
        println!(
            "  {} ({} user-cycles, {} records)",
            game.name, summary.user_cycles, summary.records
        );
    }
    if games.len() > config.query_limit {
        println!("  ... and {} more", games.len() - config.query_limit);
    }
    println!("\nUsage: grindlog export <game> | grindlog export all");
    Ok(())
}
