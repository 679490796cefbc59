//! Migration loader: turns source artifacts plus a ledger snapshot into
//! `MigrationRecord`s, and validates declared dependencies.

use crate::artifact::parse_artifact_name;
use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::header::parse_header;
use crate::migration::MigrationRecord;
use crate::migration_id::MigrationId;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A raw artifact: resource name plus verbatim body.
#[derive(Debug, Clone)]
pub struct SourceArtifact {
    pub filename: String,
    pub sql: String,
}

/// Ledger state consulted while loading, read once before scheduling.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    /// Filenames of non-repeatable artifacts already performed (exclusions).
    pub performed: HashSet<String>,

    /// Last recorded content hash per repeatable filename.
    pub repeatable_hashes: HashMap<String, String>,
}

impl LedgerSnapshot {
    /// Snapshot of an empty ledger: everything runs.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Build a `MigrationRecord` for every source artifact.
///
/// `should_run` is computed here from the snapshot alone: Versioned/Seed run
/// unless their filename is excluded; Repeatable run when the body hash
/// differs from the last recorded one (a missing entry counts as different).
/// No database access happens in this step.
pub fn load_records(
    sources: &[SourceArtifact],
    snapshot: &LedgerSnapshot,
) -> CoreResult<Vec<MigrationRecord>> {
    let mut records = Vec::with_capacity(sources.len());
    let mut seen: HashMap<MigrationId, String> = HashMap::new();

    for source in sources {
        let name = parse_artifact_name(&source.filename)?;
        let header = parse_header(&source.filename, &source.sql)?;

        let id = match header.id {
            Some(explicit) => {
                MigrationId::try_new(explicit).ok_or_else(|| CoreError::EmptyName {
                    context: format!("explicit id in '{}'", source.filename),
                })?
            }
            None => MigrationId::new(source.filename.clone()),
        };

        if let Some(first) = seen.insert(id.clone(), source.filename.clone()) {
            return Err(CoreError::DuplicateId {
                id: id.into_inner(),
                first,
                second: source.filename.clone(),
            });
        }

        let mut dependencies = BTreeSet::new();
        for dep in header.dependencies {
            let dep = MigrationId::try_new(dep).ok_or_else(|| CoreError::EmptyName {
                context: format!("dependency of '{}'", source.filename),
            })?;
            dependencies.insert(dep);
        }

        let should_run = if name.kind.is_repeatable() {
            snapshot.repeatable_hashes.get(&source.filename)
                != Some(&compute_checksum(&source.sql))
        } else {
            !snapshot.performed.contains(&source.filename)
        };

        log::debug!(
            "loaded {} ({}, should_run={})",
            id,
            source.filename,
            should_run
        );

        records.push(MigrationRecord {
            id,
            filename: source.filename.clone(),
            kind: name.kind,
            version: name.version,
            description: name.description,
            sql: source.sql.clone(),
            dependencies,
            should_run,
            wave: None,
        });
    }

    Ok(records)
}

/// Check that every declared dependency id resolves to a known record.
///
/// Collects all offending `(record id, dependency id)` pairs before failing
/// so the caller sees the complete list; nothing may execute if any exist.
pub fn validate_dependencies(records: &[MigrationRecord]) -> CoreResult<()> {
    let known: HashSet<&MigrationId> = records.iter().map(|r| &r.id).collect();

    let mut pairs = Vec::new();
    for record in records {
        for dep in &record.dependencies {
            if !known.contains(dep) {
                pairs.push((record.id.as_str().to_string(), dep.as_str().to_string()));
            }
        }
    }

    if pairs.is_empty() {
        Ok(())
    } else {
        Err(CoreError::UnresolvedDependencies { pairs })
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
