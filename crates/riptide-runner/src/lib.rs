//! riptide-runner - Drives a full migration run
//!
//! Pipeline per invocation: discover artifacts, load records against a
//! ledger snapshot, validate declared dependencies, build the fact graph,
//! plan waves, then execute wave by wave with fail-fast semantics. The
//! programmatic surface is [`init`], [`plan`] and [`migrate`].

pub mod discover;
pub mod error;
mod execute;
pub mod report;
mod runner;

pub use discover::discover_artifacts;
pub use error::{RunnerError, RunnerResult};
pub use report::{ProgressEvent, Reporter};
pub use runner::{init, migrate, plan, AppliedMigration, MigrateOptions, MigrationPlan};
