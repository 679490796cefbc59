//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for Riptide.
///
/// One implementation wraps the single connection/session a migration run
/// owns; the ledger reads before scheduling and the execution engine's
/// statements all go through it sequentially. Implementations must be
/// Send + Sync.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returning affected rows.
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements as one batch.
    ///
    /// A batch wrapped in `BEGIN TRANSACTION` / `COMMIT` is the unit the
    /// ledger uses for its invalidate-then-insert pair.
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a query and return every row with each column rendered as an
    /// optional string (`None` for SQL NULL).
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<Option<String>>>>;

    /// Check whether a table exists in the default schema.
    async fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging.
    fn db_type(&self) -> &'static str;
}
