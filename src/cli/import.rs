//! Spreadsheet import command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use grindlog::config::Config;
use grindlog::import::{self, Reconciler};
use grindlog::ledger::LedgerManager;
use grindlog::registry::GameRegistry;

/// Import a spreadsheet, or list importable files when none is named.
pub fn import_command(config: &Config, file: Option<&str>) -> Result<()> {
    let Some(file) = file else {
        return list_importable(config);
    };

    let path = resolve_file(config, file)?;
    let game_name = import::game_name_for(&path);
    let grid = import::read_grid(&path)?;
    if grid.is_empty() {
        bail!("no usable rows in {}", path.display());
    }

    let ledger = LedgerManager::open(&config.db_path())?;
    let store = ledger.store();
    let reconciler = Reconciler::new(store.clone(), config.completion_threshold);
    let report = reconciler.import_grid(&game_name, &grid)?;

    // New games become dispatchable immediately.
    let mut registry = GameRegistry::new();
    registry.refresh(&store)?;

    println!("Imported {} into game '{}'", path.display(), report.game);
    if report.existing_game {
        println!("  records before: {}", report.records_before);
        println!("  records after:  {}", report.records_after);
        println!("  new records:    {}", report.new_records);
        println!("  cells imported: {}", report.imported);
    } else {
        println!(
            "  new game, {} record(s) from {} row(s)",
            report.imported, report.rows
        );
    }
    println!("{} game(s) registered", registry.len());
    Ok(())
}

fn list_importable(config: &Config) -> Result<()> {
    let files = import::list_files(&config.data_dir)?;
    if files.is_empty() {
        println!("No spreadsheets found in {}", config.data_dir.display());
        return Ok(());
    }

    println!("Importable spreadsheets:");
    for path in files.iter().take(config.query_limit) {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            println!("  {} ({})", name, import::game_name_for(path));
        }
    }
    if files.len() > config.query_limit {
        println!("  ... and {} more", files.len() - config.query_limit);
    }
    println!("\nUsage: grindlog import <file>");
    Ok(())
}

fn resolve_file(config: &Config, file: &str) -> Result<PathBuf> {
    let direct = Path::new(file);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }
    if let Some(path) = import::find_file(&config.data_dir, file)? {
        return Ok(path);
    }
    bail!(
        "file not found: {file} (searched {})",
        config.data_dir.display()
    );
}
