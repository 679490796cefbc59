//! Artifact naming scheme: `V<version>__<description>.sql` (and `R`/`S`).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of migration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationKind {
    /// Runs at most once.
    Versioned,
    /// Re-applied whenever its content hash changes (or a dependency re-runs).
    Repeatable,
    /// Non-repeatable data-loading artifact; scheduled like Versioned.
    Seed,
}

impl MigrationKind {
    /// Ledger column value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationKind::Versioned => "versioned",
            MigrationKind::Repeatable => "repeatable",
            MigrationKind::Seed => "seed",
        }
    }

    /// Parse a ledger column value back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "versioned" => Some(MigrationKind::Versioned),
            "repeatable" => Some(MigrationKind::Repeatable),
            "seed" => Some(MigrationKind::Seed),
            _ => None,
        }
    }

    /// Whether the ledger keeps a content hash for this kind.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, MigrationKind::Repeatable)
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed components of an artifact filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub kind: MigrationKind,
    /// Digit version token; required for Versioned/Seed, optional for Repeatable.
    pub version: Option<String>,
    /// Free-text description with single underscores rendered as spaces.
    pub description: String,
}

/// Parse a filename against the case-sensitive naming scheme
/// `T<version>__<description>.sql` with `T` one of `V`, `R`, `S`.
pub fn parse_artifact_name(filename: &str) -> CoreResult<ArtifactName> {
    let malformed = |reason: &str| CoreError::MalformedArtifact {
        filename: filename.to_string(),
        reason: reason.to_string(),
    };

    let stem = filename
        .strip_suffix(".sql")
        .ok_or_else(|| malformed("expected '.sql' suffix"))?;

    let mut chars = stem.chars();
    let kind = match chars.next() {
        Some('V') => MigrationKind::Versioned,
        Some('R') => MigrationKind::Repeatable,
        Some('S') => MigrationKind::Seed,
        _ => return Err(malformed("expected 'V', 'R' or 'S' prefix")),
    };

    let rest = chars.as_str();
    let (version_part, description) = rest
        .split_once("__")
        .ok_or_else(|| malformed("expected '__' separator"))?;

    if !version_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed("version must contain only digits"));
    }

    let version = if version_part.is_empty() {
        if kind != MigrationKind::Repeatable {
            return Err(malformed("version is required for versioned and seed artifacts"));
        }
        None
    } else {
        Some(version_part.to_string())
    };

    Ok(ArtifactName {
        kind,
        version,
        description: description.replace('_', " "),
    })
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
