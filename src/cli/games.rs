//! Game listing command.

use anyhow::Result;

use grindlog::config::Config;
use grindlog::ledger::LedgerManager;

/// List every game in the ledger, in creation order.
pub fn games_command(config: &Config) -> Result<()> {
    let ledger = LedgerManager::open(&config.db_path())?;
    let store = ledger.store();
    let games = store.list_games()?;

    if games.is_empty() {
        println!("The ledger has no games yet. Import a spreadsheet to create one.");
        return Ok(());
    }

    println!("Games ({}):\n", games.len());
    for game in &games {
        let summary = store.game_summary(game.id)?;
        println!(
            "  {} - {} user-cycles, {} records, {} completed",
            game.name, summary.user_cycles, summary.records, summary.completed_cycles
        );
    }
    Ok(())
}
