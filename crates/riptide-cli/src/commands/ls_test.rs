use super::*;
use crate::cli::MigrateArgs;
use crate::commands::{init, migrate};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn global(dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.to_path_buf(),
        database: None,
        table: None,
    }
}

fn setup_project(dir: &Path) {
    let db_path = dir.join("db.duckdb");
    fs::write(
        dir.join("riptide.yml"),
        format!("database:\n  path: \"{}\"\n", db_path.display()),
    )
    .unwrap();
    fs::create_dir_all(dir.join("migrations")).unwrap();
    fs::write(
        dir.join("migrations/V1__a.sql"),
        "CREATE TABLE a (id INT)",
    )
    .unwrap();
    fs::write(
        dir.join("migrations/R__v.sql"),
        "/* dependencies: [V1__a.sql] */\nCREATE OR REPLACE VIEW v AS SELECT * FROM a",
    )
    .unwrap();
}

#[tokio::test]
async fn test_ls_lists_pending_then_up_to_date() {
    let temp = tempdir().unwrap();
    setup_project(temp.path());

    let global = global(temp.path());
    init::execute(&global).await.unwrap();

    let args = LsArgs {
        root: None,
        output: OutputFormat::Text,
    };
    execute(&args, &global).await.unwrap();

    migrate::execute(
        &MigrateArgs {
            root: None,
            dry_run: false,
            output: OutputFormat::Text,
        },
        &global,
    )
    .await
    .unwrap();

    // After a successful migrate everything reads as up to date.
    execute(&args, &global).await.unwrap();
}

#[tokio::test]
async fn test_ls_json_output() {
    let temp = tempdir().unwrap();
    setup_project(temp.path());

    let global = global(temp.path());
    init::execute(&global).await.unwrap();

    let args = LsArgs {
        root: None,
        output: OutputFormat::Json,
    };
    execute(&args, &global).await.unwrap();
}

#[tokio::test]
async fn test_ls_before_init_fails() {
    let temp = tempdir().unwrap();
    setup_project(temp.path());

    let args = LsArgs {
        root: None,
        output: OutputFormat::Text,
    };
    let err = execute(&args, &global(temp.path())).await.unwrap_err();
    assert!(err.to_string().contains("init"));
}
