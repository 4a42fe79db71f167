//! Errors raised by the keyed product store.

use food_types::BarcodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    /// The database was opened without the products column family
    #[error("missing column family: {0}")]
    ColumnFamilyNotFound(String),

    #[error("invalid product key: {0}")]
    Key(#[from] BarcodeError),

    #[error("product store is open read-only")]
    ReadOnly,
}
