//! Artifact discovery: read `*.sql` files from the migration root.

use riptide_core::{CoreError, CoreResult, SourceArtifact};
use std::path::Path;

/// Collect every `.sql` file directly under `root`, sorted by filename so a
/// fixed directory always yields the same record set.
///
/// Subdirectories and other extensions are ignored; naming-scheme errors are
/// the loader's concern, not discovery's.
pub fn discover_artifacts(root: &Path) -> CoreResult<Vec<SourceArtifact>> {
    let entries = std::fs::read_dir(root).map_err(|e| CoreError::IoWithPath {
        path: root.display().to_string(),
        source: e,
    })?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("sql") {
            continue;
        }

        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let sql = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        artifacts.push(SourceArtifact {
            filename: filename.to_string(),
            sql,
        });
    }

    artifacts.sort_by(|a, b| a.filename.cmp(&b.filename));
    log::debug!("discovered {} artifact(s) in {}", artifacts.len(), root.display());
    Ok(artifacts)
}
