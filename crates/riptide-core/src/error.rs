//! Error types for riptide-core

use thiserror::Error;

/// Render unresolved `(record, dependency)` pairs for error display.
fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(record, dep)| format!("{} -> {}", record, dep))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Core error type for Riptide
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Artifact filename does not match the naming scheme
    #[error("[E001] Malformed artifact name '{filename}': {reason}")]
    MalformedArtifact { filename: String, reason: String },

    /// E002: Metadata block could not be parsed
    #[error("[E002] Invalid metadata block in '{filename}': {message}")]
    InvalidHeader { filename: String, message: String },

    /// E003: Two artifacts declare the same migration id
    #[error("[E003] Duplicate migration id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    /// E004: Declared dependencies that resolve to no known migration.
    /// Carries every offending (record id, dependency id) pair.
    #[error("[E004] Unresolved dependencies: {}", format_pairs(.pairs))]
    UnresolvedDependencies { pairs: Vec<(String, String)> },

    /// E005: Circular dependency detected
    #[error("[E005] Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// E006: Migration referenced by id but not present in the graph
    #[error("[E006] Unknown migration: {id}")]
    UnknownMigration { id: String },

    /// E007: Empty name where a migration id was required
    #[error("[E007] Empty name: {context}")]
    EmptyName { context: String },

    /// E008: IO error
    #[error("[E008] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E009: IO error with file path context
    #[error("[E009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
