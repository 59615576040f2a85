//! SQLite storage layer.
//!
//! The schema migrator, the single-connection storage engine, and the
//! conversation repository built on top of it.

pub(crate) mod error;
pub mod conversation;
pub mod migrate;
pub mod pool;
