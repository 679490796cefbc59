//! Riptide CLI - dependency-aware SQL migrations for DuckDB

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod context;

use cli::Cli;
use commands::{init, ls, migrate};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Init => init::execute(&cli.global).await,
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Ls(args) => ls::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(code) = err.downcast_ref::<commands::common::ExitCode>() {
            std::process::exit(code.0);
        }
        return Err(err);
    }
    Ok(())
}
