//! Configuration loading and management.
//!
//! Loaded once at startup and passed into the components that need it;
//! nothing in the crate reads configuration through a global.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the ledger database, importable spreadsheets and
    /// the exports subdirectory
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Count at which a user-cycle is marked completed
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: i64,

    /// Maximum entries shown by listing commands
    #[serde(default = "default_query_limit")]
    pub query_limit: usize,

    /// Export row height (points)
    #[serde(default = "default_row_height")]
    pub row_height: f64,

    /// Export width of the identity column (characters)
    #[serde(default = "default_name_column_width")]
    pub name_column_width: f64,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grindlog")
}

fn default_completion_threshold() -> i64 {
    30
}

fn default_query_limit() -> usize {
    10
}

fn default_row_height() -> f64 {
    50.0
}

fn default_name_column_width() -> f64 {
    20.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            completion_threshold: default_completion_threshold(),
            query_limit: default_query_limit(),
            row_height: default_row_height(),
            name_column_width: default_name_column_width(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a directory: `grindlog.toml` if present,
    /// defaults otherwise.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join("grindlog.toml");
        if path.exists() {
            return Self::from_file(&path);
        }
        Ok(Self::default())
    }

    /// Path of the ledger database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("records.db")
    }

    /// Directory export files are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_apply_for_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grindlog.toml");
        std::fs::write(&path, "completion_threshold = 50\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.completion_threshold, 50);
        assert_eq!(config.query_limit, 10);
        assert_eq!(config.row_height, 50.0);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.completion_threshold, 30);
        assert!(config.db_path().ends_with("records.db"));
        assert!(config.export_dir().ends_with("exports"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grindlog.toml");
        std::fs::write(&path, "completion_threshold = \"many\"\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
