//! Migrate command implementation - plans and executes pending migrations

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use riptide_runner::{MigrationPlan, ProgressEvent, Reporter};
use serde::Serialize;
use std::time::Instant;

use super::common::{print_json, print_table, CommandResults, ExitCode};
use crate::cli::{GlobalArgs, MigrateArgs, OutputFormat};
use crate::context::RuntimeContext;

/// JSON shape for `migrate --dry-run`.
#[derive(Debug, Serialize)]
struct PlanOutput {
    waves: Vec<Vec<String>>,
    pending: usize,
    up_to_date: usize,
}

/// Execute the migrate command
pub(crate) async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global, args.root.as_deref())?;
    let start = Instant::now();

    ctx.verbose(&format!(
        "planning migrations from {}",
        ctx.opts.root.display()
    ));
    let plan = riptide_runner::plan(&ctx.db, &ctx.opts).await?;
    let pending: usize = plan.waves.iter().map(Vec::len).sum();

    if args.dry_run {
        return print_plan(&plan, pending, args.output);
    }

    if pending == 0 {
        match args.output {
            OutputFormat::Text => println!("Nothing to apply - everything is up to date"),
            OutputFormat::Json => {
                print_json(&CommandResults::<riptide_runner::AppliedMigration> {
                    timestamp: Utc::now(),
                    elapsed_secs: start.elapsed().as_secs_f64(),
                    success_count: 0,
                    failure_count: 0,
                    error: None,
                    results: Vec::new(),
                })?;
            }
        }
        return Ok(());
    }

    if args.output == OutputFormat::Text {
        println!(
            "Applying {} migrations in {} waves...\n",
            pending,
            plan.waves.len()
        );
    }

    // Create progress bar for text output
    let progress = if args.output == OutputFormat::Text {
        let pb = ProgressBar::new(pending as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reporter = match &progress {
        Some(pb) => {
            let pb = pb.clone();
            Reporter::new(move |event| match event {
                ProgressEvent::Start { id, .. } => {
                    pb.set_message(id.clone());
                }
                ProgressEvent::Done { id, elapsed_ms } => {
                    pb.println(format!("  ✓ {} [{}ms]", id, elapsed_ms));
                    pb.inc(1);
                }
                ProgressEvent::Error { id, message } => {
                    pb.println(format!("  ✗ {} - {}", id, message));
                }
                ProgressEvent::Progress { .. } => {}
            })
        }
        None => Reporter::silent(),
    };

    match riptide_runner::migrate(&ctx.db, &ctx.opts, &reporter).await {
        Ok(applied) => {
            if let Some(pb) = &progress {
                pb.finish_and_clear();
            }
            match args.output {
                OutputFormat::Text => {
                    println!();
                    println!(
                        "Completed {} migrations in {} waves",
                        applied.len(),
                        plan.waves.len()
                    );
                    println!("Total time: {}ms", start.elapsed().as_millis());
                }
                OutputFormat::Json => {
                    print_json(&CommandResults {
                        timestamp: Utc::now(),
                        elapsed_secs: start.elapsed().as_secs_f64(),
                        success_count: applied.len(),
                        failure_count: 0,
                        error: None,
                        results: applied,
                    })?;
                }
            }
            Ok(())
        }
        Err(err) => {
            if let Some(pb) = &progress {
                pb.finish_and_clear();
            }
            let applied = err.applied().to_vec();
            match args.output {
                OutputFormat::Text => {
                    eprintln!("Error: {}", err);
                    if !applied.is_empty() {
                        println!(
                            "\n{} migration(s) completed before the failure and stay recorded",
                            applied.len()
                        );
                    }
                }
                OutputFormat::Json => {
                    print_json(&CommandResults {
                        timestamp: Utc::now(),
                        elapsed_secs: start.elapsed().as_secs_f64(),
                        success_count: applied.len(),
                        failure_count: 1,
                        error: Some(err.to_string()),
                        results: applied,
                    })?;
                }
            }
            Err(ExitCode(1).into())
        }
    }
}

/// Print planned waves without executing anything.
fn print_plan(plan: &MigrationPlan, pending: usize, output: OutputFormat) -> Result<()> {
    let up_to_date = plan.graph.len() - pending;

    match output {
        OutputFormat::Text => {
            if pending == 0 {
                println!("Nothing to apply - everything is up to date");
                return Ok(());
            }
            for (i, wave) in plan.waves.iter().enumerate() {
                let rows: Vec<Vec<String>> = wave
                    .iter()
                    .filter_map(|id| plan.graph.record(id))
                    .map(|record| {
                        vec![record.id.to_string(), record.descriptor()]
                    })
                    .collect();
                println!("Wave {}:", i + 1);
                print_table(&["ID", "MIGRATION"], &rows);
                println!();
            }
            println!("{} pending, {} up to date", pending, up_to_date);
        }
        OutputFormat::Json => {
            print_json(&PlanOutput {
                waves: plan
                    .waves
                    .iter()
                    .map(|wave| wave.iter().map(|id| id.to_string()).collect())
                    .collect(),
                pending,
                up_to_date,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
