//! Init command implementation - prepares the ledger and migrations directory

use anyhow::{Context, Result};
use std::fs;

use crate::cli::GlobalArgs;
use crate::context::RuntimeContext;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, None)?;

    if !ctx.opts.root.exists() {
        fs::create_dir_all(&ctx.opts.root).with_context(|| {
            format!(
                "Failed to create migrations directory: {}",
                ctx.opts.root.display()
            )
        })?;
        println!("Created migrations directory: {}", ctx.opts.root.display());
    }

    ctx.verbose(&format!(
        "initializing ledger table '{}' in '{}'",
        ctx.opts.table, ctx.config.database.path
    ));
    riptide_runner::init(&ctx.db, &ctx.opts)
        .await
        .context("Failed to initialize ledger")?;
    println!("Ledger table '{}' is ready", ctx.opts.table);

    Ok(())
}
