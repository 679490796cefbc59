//! Ledger table access: DDL, snapshot reads, performed/invalidated writes.

use crate::entry::{LedgerEntry, LedgerStatus};
use crate::error::{LedgerError, LedgerResult};
use chrono::Utc;
use riptide_core::loader::LedgerSnapshot;
use riptide_core::sql::{escape_sql_string, quote_ident};
use riptide_core::{compute_checksum, MigrationKind, MigrationRecord};
use riptide_db::Database;

/// Default ledger table name.
pub const DEFAULT_TABLE: &str = "migrations";

/// Handle to the ledger table of one target database.
///
/// Reads happen once per run (before scheduling); each successful migration
/// writes one row afterwards. The repeatable invalidate-then-insert pair is
/// one transaction; a migration's own SQL is not part of it, so a crash
/// between execution and bookkeeping leaves the migration applied but
/// unrecorded. That gap is a documented operational caveat, not something
/// this module hides.
#[derive(Debug, Clone)]
pub struct Ledger {
    table: String,
}

impl Ledger {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// The configured table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn ddl(&self) -> String {
        let table = quote_ident(&self.table);
        let index = quote_ident(&format!("idx_{}_type_filename", self.table));
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (\n\
             \x20   type varchar(32) NOT NULL,\n\
             \x20   version varchar(32),\n\
             \x20   filename varchar(512) NOT NULL,\n\
             \x20   hash varchar(256),\n\
             \x20   status varchar(32) NOT NULL,\n\
             \x20   performed_at timestamp NOT NULL\n\
             );\n\
             CREATE INDEX IF NOT EXISTS {index} ON {table} (type, filename);"
        )
    }

    /// Idempotently create the ledger table and its index.
    pub async fn init(&self, db: &dyn Database) -> LedgerResult<()> {
        log::debug!("ensuring ledger table '{}'", self.table);
        db.execute_batch(&self.ddl()).await?;
        Ok(())
    }

    /// Whether the ledger table exists.
    pub async fn exists(&self, db: &dyn Database) -> LedgerResult<bool> {
        Ok(db.table_exists(&self.table).await?)
    }

    /// Fail with [`LedgerError::Uninitialized`] unless the table exists.
    ///
    /// Called before anything else in a run so a missing ledger is
    /// distinguished from ordinary database errors and no migration SQL is
    /// attempted.
    pub async fn require(&self, db: &dyn Database) -> LedgerResult<()> {
        if self.exists(db).await? {
            Ok(())
        } else {
            Err(LedgerError::Uninitialized {
                table: self.table.clone(),
            })
        }
    }

    /// Read the state the loader needs: performed non-repeatable filenames
    /// and the current hash per repeatable filename.
    pub async fn snapshot(&self, db: &dyn Database) -> LedgerResult<LedgerSnapshot> {
        self.require(db).await?;

        let sql = format!(
            "SELECT type, filename, hash FROM {} WHERE status = 'performed'",
            quote_ident(&self.table)
        );

        let mut snapshot = LedgerSnapshot::empty();
        for row in db.query_rows(&sql).await? {
            let filename = row
                .get(1)
                .cloned()
                .flatten()
                .ok_or_else(|| LedgerError::MalformedRow {
                    filename: String::new(),
                    message: "NULL filename".to_string(),
                })?;

            let kind = row.first().cloned().flatten().and_then(|k| {
                MigrationKind::parse(&k)
            });
            match kind {
                Some(MigrationKind::Repeatable) => {
                    let hash = row.get(2).cloned().flatten().unwrap_or_default();
                    snapshot.repeatable_hashes.insert(filename, hash);
                }
                Some(_) => {
                    snapshot.performed.insert(filename);
                }
                None => {
                    return Err(LedgerError::MalformedRow {
                        filename,
                        message: "unknown migration type".to_string(),
                    });
                }
            }
        }

        Ok(snapshot)
    }

    /// All ledger rows, oldest first. Used for status listings.
    pub async fn entries(&self, db: &dyn Database) -> LedgerResult<Vec<LedgerEntry>> {
        self.require(db).await?;

        let sql = format!(
            "SELECT type, version, filename, hash, status, CAST(performed_at AS VARCHAR) \
             FROM {} ORDER BY performed_at, filename",
            quote_ident(&self.table)
        );

        let mut entries = Vec::new();
        for row in db.query_rows(&sql).await? {
            let filename = row.get(2).cloned().flatten().unwrap_or_default();
            let malformed = |message: &str| LedgerError::MalformedRow {
                filename: filename.clone(),
                message: message.to_string(),
            };

            let kind = row
                .first()
                .cloned()
                .flatten()
                .and_then(|k| MigrationKind::parse(&k))
                .ok_or_else(|| malformed("unknown migration type"))?;
            let status = row
                .get(4)
                .cloned()
                .flatten()
                .and_then(|s| LedgerStatus::parse(&s))
                .ok_or_else(|| malformed("unknown status"))?;

            entries.push(LedgerEntry {
                kind,
                version: row.get(1).cloned().flatten(),
                filename: filename.clone(),
                hash: row.get(3).cloned().flatten(),
                status,
                performed_at: row.get(5).cloned().flatten().unwrap_or_default(),
            });
        }

        Ok(entries)
    }

    /// Persist a successful execution of `record`.
    ///
    /// Repeatable: within one transaction, mark the filename's prior
    /// performed row(s) invalidated, then insert a fresh performed row with
    /// the current content hash. Versioned/Seed: insert one performed row,
    /// no hash.
    pub async fn record(&self, db: &dyn Database, record: &MigrationRecord) -> LedgerResult<()> {
        let table = quote_ident(&self.table);
        let filename = escape_sql_string(&record.filename);
        let version = match &record.version {
            Some(v) => format!("'{}'", escape_sql_string(v)),
            None => "NULL".to_string(),
        };
        let performed_at = Utc::now().format("%Y-%m-%d %H:%M:%S%.6f");

        let sql = if record.kind.is_repeatable() {
            let hash = compute_checksum(&record.sql);
            format!(
                "BEGIN TRANSACTION;\n\
                 UPDATE {table} SET status = 'invalidated' \
                 WHERE filename = '{filename}' AND status = 'performed';\n\
                 INSERT INTO {table} (type, version, filename, hash, status, performed_at) \
                 VALUES ('{kind}', {version}, '{filename}', '{hash}', 'performed', '{performed_at}');\n\
                 COMMIT;",
                kind = record.kind,
            )
        } else {
            format!(
                "INSERT INTO {table} (type, version, filename, hash, status, performed_at) \
                 VALUES ('{kind}', {version}, '{filename}', NULL, 'performed', '{performed_at}');",
                kind = record.kind,
            )
        };

        log::debug!("recording {} in ledger '{}'", record.filename, self.table);
        db.execute_batch(&sql).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
