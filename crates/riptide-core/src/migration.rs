//! Migration record: one fact-graph node per source artifact.

use crate::artifact::MigrationKind;
use crate::migration_id::MigrationId;
use serde::Serialize;
use std::collections::BTreeSet;

/// A single migration artifact, constructed fresh on every invocation from
/// its source plus a ledger snapshot. Never persisted; only ledger rows
/// survive across runs.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationRecord {
    /// Stable identity; defaults to the filename when the metadata block
    /// declares no explicit id. Unique across the record set.
    pub id: MigrationId,

    /// On-disk/resource name, used as the ledger join key.
    pub filename: String,

    /// Versioned, Repeatable or Seed.
    pub kind: MigrationKind,

    /// Ordered digit token; required for Versioned/Seed, optional for
    /// Repeatable.
    pub version: Option<String>,

    /// Human-readable description derived from the filename.
    pub description: String,

    /// Artifact body, executed verbatim.
    pub sql: String,

    /// Declared dependency ids; must all resolve before scheduling.
    pub dependencies: BTreeSet<MigrationId>,

    /// Whether ledger state alone requires this record to run: not yet
    /// performed (Versioned/Seed), or content hash changed (Repeatable).
    /// Runnability may additionally cascade through repeatable dependents.
    pub should_run: bool,

    /// Execution wave, assigned by the scheduler; 1-based, immutable once
    /// set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave: Option<usize>,
}

impl MigrationRecord {
    /// Short descriptor for progress output, e.g. `versioned V3 create users`.
    pub fn descriptor(&self) -> String {
        match &self.version {
            Some(v) => format!("{} {}{} {}", self.kind, kind_letter(self.kind), v, self.description),
            None => format!("{} {}", self.kind, self.description),
        }
    }
}

fn kind_letter(kind: MigrationKind) -> char {
    match kind {
        MigrationKind::Versioned => 'V',
        MigrationKind::Repeatable => 'R',
        MigrationKind::Seed => 'S',
    }
}
