//! Command implementations for the Riptide CLI

pub(crate) mod common;
pub(crate) mod init;
pub(crate) mod ls;
pub(crate) mod migrate;
