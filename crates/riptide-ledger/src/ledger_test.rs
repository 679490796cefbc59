use super::*;
use riptide_db::DuckDbBackend;
use std::collections::BTreeSet;

fn record(kind: MigrationKind, filename: &str, sql: &str) -> MigrationRecord {
    MigrationRecord {
        id: riptide_core::MigrationId::new(filename),
        filename: filename.to_string(),
        kind,
        version: match kind {
            MigrationKind::Repeatable => None,
            _ => Some("1".to_string()),
        },
        description: "test".to_string(),
        sql: sql.to_string(),
        dependencies: BTreeSet::new(),
        should_run: true,
        wave: Some(1),
    }
}

#[tokio::test]
async fn test_init_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);

    ledger.init(&db).await.unwrap();
    ledger.init(&db).await.unwrap();
    assert!(ledger.exists(&db).await.unwrap());
}

#[tokio::test]
async fn test_require_before_init() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new("custom_ledger");

    let err = ledger.require(&db).await.unwrap_err();
    assert!(matches!(err, LedgerError::Uninitialized { ref table } if table == "custom_ledger"));

    // Snapshot refuses for the same reason.
    assert!(ledger.snapshot(&db).await.is_err());
}

#[tokio::test]
async fn test_empty_snapshot() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);
    ledger.init(&db).await.unwrap();

    let snapshot = ledger.snapshot(&db).await.unwrap();
    assert!(snapshot.performed.is_empty());
    assert!(snapshot.repeatable_hashes.is_empty());
}

#[tokio::test]
async fn test_record_versioned_and_seed() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);
    ledger.init(&db).await.unwrap();

    let versioned = record(MigrationKind::Versioned, "V1__users.sql", "SELECT 1");
    let seed = record(MigrationKind::Seed, "S1__countries.sql", "SELECT 2");
    ledger.record(&db, &versioned).await.unwrap();
    ledger.record(&db, &seed).await.unwrap();

    let snapshot = ledger.snapshot(&db).await.unwrap();
    assert!(snapshot.performed.contains("V1__users.sql"));
    assert!(snapshot.performed.contains("S1__countries.sql"));
    assert!(snapshot.repeatable_hashes.is_empty());

    let entries = ledger.entries(&db).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.status == LedgerStatus::Performed));
    assert!(entries.iter().all(|e| e.hash.is_none()));
}

#[tokio::test]
async fn test_record_repeatable_stores_hash() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);
    ledger.init(&db).await.unwrap();

    let sql = "CREATE VIEW v AS SELECT 1";
    let repeatable = record(MigrationKind::Repeatable, "R__v.sql", sql);
    ledger.record(&db, &repeatable).await.unwrap();

    let snapshot = ledger.snapshot(&db).await.unwrap();
    assert_eq!(
        snapshot.repeatable_hashes.get("R__v.sql"),
        Some(&compute_checksum(sql))
    );
}

#[tokio::test]
async fn test_repeatable_rerecord_invalidates_prior_row() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);
    ledger.init(&db).await.unwrap();

    let first = record(MigrationKind::Repeatable, "R__v.sql", "CREATE VIEW v AS SELECT 1");
    let second = record(
        MigrationKind::Repeatable,
        "R__v.sql",
        "CREATE OR REPLACE VIEW v AS SELECT 2",
    );
    ledger.record(&db, &first).await.unwrap();
    ledger.record(&db, &second).await.unwrap();

    let entries = ledger.entries(&db).await.unwrap();
    let performed: Vec<_> = entries
        .iter()
        .filter(|e| e.status == LedgerStatus::Performed)
        .collect();
    let invalidated: Vec<_> = entries
        .iter()
        .filter(|e| e.status == LedgerStatus::Invalidated)
        .collect();

    // History accumulates: exactly one live row, the older one invalidated.
    assert_eq!(performed.len(), 1);
    assert_eq!(invalidated.len(), 1);
    assert_eq!(
        performed[0].hash.as_deref(),
        Some(compute_checksum(&second.sql).as_str())
    );

    // Snapshot reflects only the live row.
    let snapshot = ledger.snapshot(&db).await.unwrap();
    assert_eq!(
        snapshot.repeatable_hashes.get("R__v.sql"),
        Some(&compute_checksum(&second.sql))
    );
}

#[tokio::test]
async fn test_filename_with_quote_is_escaped() {
    let db = DuckDbBackend::in_memory().unwrap();
    let ledger = Ledger::new(DEFAULT_TABLE);
    ledger.init(&db).await.unwrap();

    let odd = record(MigrationKind::Versioned, "V1__it's_fine.sql", "SELECT 1");
    ledger.record(&db, &odd).await.unwrap();

    let snapshot = ledger.snapshot(&db).await.unwrap();
    assert!(snapshot.performed.contains("V1__it's_fine.sql"));
}
