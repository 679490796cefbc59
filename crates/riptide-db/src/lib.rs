//! riptide-db - Database abstraction layer for Riptide
//!
//! This crate provides the `Database` trait used by the ledger and the
//! execution engine, plus the DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
