//! The programmatic surface: `init`, `plan`, and `migrate`.

use crate::discover::discover_artifacts;
use crate::error::RunnerResult;
use crate::execute::execute_waves;
use crate::report::Reporter;
use riptide_core::{
    load_records, plan_waves, validate_dependencies, MigrationGraph, MigrationId, MigrationKind,
};
use riptide_db::Database;
use riptide_ledger::{Ledger, DEFAULT_TABLE};
use serde::Serialize;
use std::path::PathBuf;

/// Options for one migration run; all fields have defaults.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Directory holding the `.sql` artifacts.
    pub root: PathBuf,

    /// Ledger table name.
    pub table: String,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("migrations"),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

/// Descriptor of a migration that actually executed, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedMigration {
    pub id: String,
    pub filename: String,
    pub kind: MigrationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub wave: usize,
    pub duration_ms: u64,
}

/// Everything a run knows before touching the database: the fact graph with
/// wave assignments plus the ordered waves. Powers dry runs and listings.
#[derive(Debug)]
pub struct MigrationPlan {
    pub graph: MigrationGraph,
    pub waves: Vec<Vec<MigrationId>>,
}

/// Idempotently create the ledger table and its supporting index.
pub async fn init(db: &dyn Database, opts: &MigrateOptions) -> RunnerResult<()> {
    Ledger::new(&opts.table).init(db).await?;
    Ok(())
}

/// Build the full execution plan without running any migration SQL.
///
/// Refuses with a distinct error when the ledger table is missing (the
/// caller should run [`init`] first), when a declared dependency does not
/// resolve, or when the dependency graph is cyclic.
pub async fn plan(db: &dyn Database, opts: &MigrateOptions) -> RunnerResult<MigrationPlan> {
    let ledger = Ledger::new(&opts.table);
    let snapshot = ledger.snapshot(db).await?;

    let sources = discover_artifacts(&opts.root)?;
    let records = load_records(&sources, &snapshot)?;
    validate_dependencies(&records)?;

    let mut graph = MigrationGraph::build(records)?;
    let waves = plan_waves(&mut graph)?;

    log::debug!(
        "planned {} wave(s) over {} record(s)",
        waves.len(),
        graph.len()
    );
    Ok(MigrationPlan { graph, waves })
}

/// Run every pending migration in dependency order.
///
/// Returns the descriptors of every artifact actually executed, in execution
/// order. On failure the error carries the migrations completed before the
/// failure; those remain recorded in the ledger, and no later wave was
/// started.
pub async fn migrate(
    db: &dyn Database,
    opts: &MigrateOptions,
    reporter: &Reporter,
) -> RunnerResult<Vec<AppliedMigration>> {
    let ledger = Ledger::new(&opts.table);
    let plan = plan(db, opts).await?;
    execute_waves(db, &ledger, &plan.graph, &plan.waves, reporter).await
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
