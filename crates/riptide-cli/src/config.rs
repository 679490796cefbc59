//! Configuration types and parsing for riptide.yml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project configuration from riptide.yml.
///
/// The file is optional; a missing file means all defaults. CLI flags
/// override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Directory containing migration artifacts, relative to the project
    #[serde(default = "default_root")]
    pub root: String,

    /// Ledger table name
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            root: default_root(),
            table: default_table(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

const DEFAULT_DB_PATH: &str = ":memory:";

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_root() -> String {
    "migrations".to_string()
}

fn default_table() -> String {
    riptide_ledger::DEFAULT_TABLE.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load configuration from a project directory.
    /// Looks for riptide.yml or riptide.yaml; absent file means defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let yml_path = dir.join("riptide.yml");
        let yaml_path = dir.join("riptide.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
