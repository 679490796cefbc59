//! riptide-core - Core library for Riptide
//!
//! This crate provides the migration data model, artifact filename and
//! metadata-block parsing, content checksums, the dependency fact graph with
//! its runnability fixpoint, and the wave scheduler used by the runner.

pub mod artifact;
pub mod checksum;
pub mod error;
pub mod graph;
pub mod header;
pub mod loader;
pub mod migration;
pub mod migration_id;
mod newtype_string;
pub mod schedule;
pub mod sql;

pub use artifact::{parse_artifact_name, ArtifactName, MigrationKind};
pub use checksum::compute_checksum;
pub use error::{CoreError, CoreResult};
pub use graph::MigrationGraph;
pub use header::{parse_header, MigrationHeader};
pub use loader::{load_records, validate_dependencies, LedgerSnapshot, SourceArtifact};
pub use migration::MigrationRecord;
pub use migration_id::MigrationId;
pub use schedule::plan_waves;
