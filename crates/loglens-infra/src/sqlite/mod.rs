//! SQLite storage layer.
//!
//! Transcript repository backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod pool;
pub mod transcript;
