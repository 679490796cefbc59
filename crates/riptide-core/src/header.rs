//! Embedded metadata block parsing.
//!
//! An artifact may start with a `/* ... */` comment whose body is a YAML map
//! with optional keys `id` and `dependencies`. Absence of the block (or of a
//! key) falls back to `id = filename` and no dependencies.

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;

/// Declared metadata from an artifact's leading comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationHeader {
    /// Explicit migration id, overriding the filename.
    #[serde(default)]
    pub id: Option<String>,

    /// Ids (or filenames) of migrations this artifact depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Parse the optional leading metadata block of `sql`.
///
/// Only a comment that opens the artifact (after leading whitespace) is
/// treated as metadata; comments further down are part of the SQL body.
pub fn parse_header(filename: &str, sql: &str) -> CoreResult<MigrationHeader> {
    let trimmed = sql.trim_start();
    let Some(after_open) = trimmed.strip_prefix("/*") else {
        return Ok(MigrationHeader::default());
    };

    let body = after_open
        .find("*/")
        .map(|end| &after_open[..end])
        .ok_or_else(|| CoreError::InvalidHeader {
            filename: filename.to_string(),
            message: "unterminated metadata comment".to_string(),
        })?;

    if body.trim().is_empty() {
        return Ok(MigrationHeader::default());
    }

    serde_yaml::from_str(body).map_err(|e| CoreError::InvalidHeader {
        filename: filename.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "header_test.rs"]
mod tests;
