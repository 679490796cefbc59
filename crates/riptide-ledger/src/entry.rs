//! Ledger row representation.

use riptide_core::MigrationKind;
use std::fmt;

/// Lifecycle status of a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerStatus {
    /// The row records a live execution.
    Performed,
    /// A repeatable artifact's superseded execution.
    Invalidated,
}

impl LedgerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerStatus::Performed => "performed",
            LedgerStatus::Invalidated => "invalidated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "performed" => Some(LedgerStatus::Performed),
            "invalidated" => Some(LedgerStatus::Invalidated),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical execution event. Repeatable artifacts accumulate a history of
/// performed/invalidated rows per filename; non-repeatable artifacts have at
/// most one performed row.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub kind: MigrationKind,
    pub version: Option<String>,
    pub filename: String,
    /// Content hash; present for repeatable artifacts only.
    pub hash: Option<String>,
    pub status: LedgerStatus,
    /// Timestamp as recorded by the database, rendered as text.
    pub performed_at: String,
}
