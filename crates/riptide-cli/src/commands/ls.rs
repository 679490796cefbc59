//! List command implementation - shows migrations and their status

use anyhow::Result;
use riptide_core::MigrationKind;
use serde::Serialize;

use super::common::{print_json, print_table};
use crate::cli::{GlobalArgs, LsArgs, OutputFormat};
use crate::context::RuntimeContext;

/// One row of `riptide ls` output.
#[derive(Debug, Serialize)]
struct MigrationInfo {
    id: String,
    kind: MigrationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    description: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    wave: Option<usize>,
}

/// Execute the ls command
pub(crate) async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args.root.as_deref())?;

    ctx.verbose(&format!(
        "listing migrations from {}",
        ctx.opts.root.display()
    ));
    let plan = riptide_runner::plan(&ctx.db, &ctx.opts).await?;

    let info: Vec<MigrationInfo> = plan
        .graph
        .records()
        .map(|record| MigrationInfo {
            id: record.id.to_string(),
            kind: record.kind,
            version: record.version.clone(),
            description: record.description.clone(),
            status: if record.wave.is_some() {
                "pending"
            } else {
                "up to date"
            },
            wave: record.wave,
        })
        .collect();

    match args.output {
        OutputFormat::Text => {
            let rows: Vec<Vec<String>> = info
                .iter()
                .map(|m| {
                    vec![
                        m.id.clone(),
                        m.kind.to_string(),
                        m.version.clone().unwrap_or_else(|| "-".to_string()),
                        m.wave.map(|w| w.to_string()).unwrap_or_else(|| "-".to_string()),
                        m.status.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "KIND", "VERSION", "WAVE", "STATUS"], &rows);

            let pending = info.iter().filter(|m| m.wave.is_some()).count();
            println!();
            println!("{} pending, {} up to date", pending, info.len() - pending);
        }
        OutputFormat::Json => print_json(&info)?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "ls_test.rs"]
mod tests;
