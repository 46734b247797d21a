//! Incremental add command.

use anyhow::{bail, Result};

use grindlog::codec;
use grindlog::config::Config;
use grindlog::ledger::{LedgerError, LedgerManager};
use grindlog::progress::{ProgressOutcome, ProgressTracker};
use grindlog::registry::GameRegistry;

/// Add `count` increments for a user in a game's active cycle.
pub fn add_command(config: &Config, game: &str, username: &str, count: u32) -> Result<()> {
    // Range checks belong to the command layer; the tracker assumes them.
    if !(1..=100).contains(&count) {
        bail!("count must be between 1 and 100");
    }
    let username = username.trim();
    if username.is_empty() {
        bail!("username must not be empty");
    }

    let ledger = LedgerManager::open(&config.db_path())?;
    let store = ledger.store();

    let mut registry = GameRegistry::new();
    registry.refresh(&store)?;
    let tracker = ProgressTracker::new(store, config.completion_threshold);

    match registry.dispatch(&tracker, game, username, count) {
        Ok(outcome) => print_outcome(&outcome),
        Err(LedgerError::GameNotFound(name)) => {
            println!("Game '{name}' is not in the ledger.");
            if registry.is_empty() {
                println!("Import a spreadsheet first: grindlog import <file>");
            } else {
                println!("Known games: {}", registry.names().join(", "));
            }
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn print_outcome(outcome: &ProgressOutcome) {
    let encoded: Vec<String> = outcome
        .appended
        .iter()
        .map(|r| codec::encode_record(&r.date, r.count))
        .collect();

    if encoded.len() == 1 {
        println!("Updated {}: {}", outcome.username, encoded[0]);
    } else {
        println!(
            "Added {} record(s) for {}: {}",
            encoded.len(),
            outcome.username,
            encoded.join(", ")
        );
    }

    if outcome.completed {
        println!(
            "Cycle {} of {} complete ({}/{})!",
            outcome.cycle, outcome.game, outcome.final_count, outcome.threshold
        );
    } else {
        println!(
            "Progress in cycle {}: {}/{}",
            outcome.cycle, outcome.final_count, outcome.threshold
        );
    }
}
