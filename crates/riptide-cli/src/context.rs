//! Runtime context for CLI commands

use anyhow::{Context, Result};
use riptide_db::DuckDbBackend;
use riptide_runner::MigrateOptions;
use std::path::Path;

use crate::cli::GlobalArgs;
use crate::config::Config;

/// Runtime context containing resolved configuration and a database
/// connection. CLI flags win over riptide.yml values.
pub(crate) struct RuntimeContext {
    /// The resolved project configuration
    pub config: Config,

    /// Database connection
    pub db: DuckDbBackend,

    /// Resolved runner options (root directory, ledger table)
    pub opts: MigrateOptions,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments and an optional
    /// per-command root override.
    pub fn new(global: &GlobalArgs, root_override: Option<&Path>) -> Result<Self> {
        let config = Config::load_from_dir(&global.project_dir)?;

        let db_path = global
            .database
            .as_deref()
            .unwrap_or(&config.database.path);
        let db = DuckDbBackend::new(db_path)
            .with_context(|| format!("Failed to open database '{}'", db_path))?;

        let root = match root_override {
            Some(root) => global.project_dir.join(root),
            None => global.project_dir.join(&config.root),
        };
        let table = global
            .table
            .clone()
            .unwrap_or_else(|| config.table.clone());

        Ok(Self {
            config,
            db,
            opts: MigrateOptions { root, table },
            verbose: global.verbose,
        })
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
