//! riptide-ledger - Persisted record of applied migrations
//!
//! The ledger is one table (default name `migrations`) in the same database
//! the migrations run against. It is read once before scheduling and written
//! after each successful execution. A migration's own SQL and its ledger row
//! are deliberately not one transaction, so a crash between the two leaves
//! the migration applied but unrecorded; see the module docs on [`Ledger`].

pub mod entry;
pub mod error;
mod ledger;

pub use entry::{LedgerEntry, LedgerStatus};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, DEFAULT_TABLE};
