//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB and an in-memory map for the KeyValueStore port
//! - JSON-over-key-value for the Repository port

pub mod duckdb;
pub mod kv;
pub mod memory;
