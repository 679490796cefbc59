use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_migrate_defaults() {
    let cli = Cli::try_parse_from(["riptide", "migrate"]).unwrap();
    match &cli.command {
        Commands::Migrate(args) => {
            assert!(args.root.is_none());
            assert!(!args.dry_run);
            assert_eq!(args.output, OutputFormat::Text);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.global.project_dir, PathBuf::from("."));
    assert!(cli.global.database.is_none());
    assert!(cli.global.table.is_none());
}

#[test]
fn test_migrate_flags() {
    let cli = Cli::try_parse_from([
        "riptide",
        "migrate",
        "--root",
        "sql",
        "--dry-run",
        "--output",
        "json",
        "--database",
        "warehouse.duckdb",
        "--table",
        "schema_history",
    ])
    .unwrap();
    match &cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.root.as_deref(), Some(std::path::Path::new("sql")));
            assert!(args.dry_run);
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.global.database.as_deref(), Some("warehouse.duckdb"));
    assert_eq!(cli.global.table.as_deref(), Some("schema_history"));
}

#[test]
fn test_global_args_work_after_subcommand() {
    let cli = Cli::try_parse_from(["riptide", "ls", "-p", "proj", "-v"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, PathBuf::from("proj"));
}
