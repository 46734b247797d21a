//! Runtime-mutable mapping from game name to its dispatch descriptor.
//!
//! Incremental commands are only valid for games the ledger already knows.
//! Instead of instantiating one handler per game, a single registry holds a
//! descriptor per game name; a successful import inserts new entries and the
//! dispatcher stays unchanged.

use std::collections::HashMap;

use crate::ledger::{LedgerError, LedgerStore, Result};
use crate::progress::{ProgressOutcome, ProgressTracker};

/// What the dispatcher needs to know about one game.
#[derive(Debug, Clone)]
pub struct GameDescriptor {
    pub id: i64,
    pub name: String,
}

/// Name -> descriptor map consulted by the incremental-add path.
#[derive(Default)]
pub struct GameRegistry {
    games: HashMap<String, GameDescriptor>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the map from the games table.
    pub fn refresh(&mut self, store: &LedgerStore) -> Result<()> {
        self.games = store
            .list_games()?
            .into_iter()
            .map(|game| {
                (
                    game.name.clone(),
                    GameDescriptor {
                        id: game.id,
                        name: game.name,
                    },
                )
            })
            .collect();
        Ok(())
    }

    /// Insert a single game, e.g. right after it was created by an import.
    pub fn register(&mut self, id: i64, name: &str) {
        self.games.insert(
            name.to_string(),
            GameDescriptor {
                id,
                name: name.to_string(),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.games.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&GameDescriptor> {
        self.games.get(name)
    }

    /// Registered game names, sorted for stable listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.games.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Route an incremental add to the tracker, rejecting unknown games
    /// before anything touches the ledger.
    pub fn dispatch(
        &self,
        tracker: &ProgressTracker,
        game: &str,
        username: &str,
        count: u32,
    ) -> Result<ProgressOutcome> {
        let descriptor = self
            .games
            .get(game)
            .ok_or_else(|| LedgerError::GameNotFound(game.to_string()))?;
        tracker.add_increments(&descriptor.name, username, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerDb;

    #[test]
    fn refresh_mirrors_the_games_table() {
        let store = LedgerStore::new(LedgerDb::open_in_memory().unwrap());
        store.create_game("raid").unwrap();
        store.create_game("dungeon").unwrap();

        let mut registry = GameRegistry::new();
        registry.refresh(&store).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("raid"));
        assert_eq!(registry.names(), vec!["dungeon", "raid"]);
    }

    #[test]
    fn register_adds_without_full_refresh() {
        let mut registry = GameRegistry::new();
        assert!(registry.is_empty());
        registry.register(7, "raid");
        assert_eq!(registry.get("raid").unwrap().id, 7);
    }

    #[test]
    fn dispatch_rejects_unknown_games() {
        let store = LedgerStore::new(LedgerDb::open_in_memory().unwrap());
        store.create_game("raid").unwrap();
        let tracker = ProgressTracker::new(store.clone(), 30);

        let mut registry = GameRegistry::new();
        registry.refresh(&store).unwrap();

        let outcome = registry.dispatch(&tracker, "raid", "alice", 2).unwrap();
        assert_eq!(outcome.final_count, 2);

        let err = registry.dispatch(&tracker, "dungeon", "alice", 1).unwrap_err();
        assert!(matches!(err, LedgerError::GameNotFound(_)));
    }
}
