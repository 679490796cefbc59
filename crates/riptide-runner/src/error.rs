//! Error types for riptide-runner

use crate::runner::AppliedMigration;
use riptide_core::CoreError;
use riptide_db::DbError;
use riptide_ledger::LedgerError;
use thiserror::Error;

/// Runner error type
#[derive(Error, Debug)]
pub enum RunnerError {
    /// R001: A migration's SQL failed. Later waves were not started; the
    /// migrations completed before the failure (including earlier records of
    /// the failing wave) are carried here and stay recorded in the ledger.
    #[error("[R001] Migration '{filename}' failed: {source}")]
    Execution {
        filename: String,
        applied: Vec<AppliedMigration>,
        source: DbError,
    },

    /// Loading, validation, or scheduling failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Ledger read/write failure (including an uninitialized ledger).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database failure outside migration execution.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl RunnerError {
    /// Migrations that completed before this error, if any.
    pub fn applied(&self) -> &[AppliedMigration] {
        match self {
            RunnerError::Execution { applied, .. } => applied,
            _ => &[],
        }
    }
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
