//! Storage layer for the fastfood product database.
//!
//! Provides RocksDB-backed storage with:
//! - A dedicated column family for product payloads
//! - Barcode-validated keys
//! - Batched writes via `WriteBatch`
//! - Read-only opening for serving processes

pub mod column_families;
pub mod db;
pub mod error;
pub mod keys;

pub use db::Storage;
pub use error::StorageError;
pub use keys::ProductKey;
pub use rocksdb::WriteBatch;
