//! Error types for riptide-ledger

use riptide_db::DbError;
use thiserror::Error;

/// Ledger operation errors
#[derive(Error, Debug)]
pub enum LedgerError {
    /// L001: Ledger table missing; the caller should run `init` first.
    #[error("[L001] Ledger table '{table}' does not exist; run init first")]
    Uninitialized { table: String },

    /// L002: A ledger row could not be interpreted.
    #[error("[L002] Malformed ledger row for '{filename}': {message}")]
    MalformedRow { filename: String, message: String },

    /// L003: Underlying database failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;
