//! RocksDB wrapper for product storage.
//!
//! Provides:
//! - Database open (read/write or read-only) with column family setup
//! - Single-key reads and writes
//! - Batched writes committed in one `DB::write`

use rocksdb::{ColumnFamily, Options, WriteBatch, DB};
use std::path::Path;
use tracing::{debug, info};

use crate::column_families::{build_cf_descriptors, ALL_CF_NAMES, CF_PRODUCTS};
use crate::error::StorageError;
use crate::keys::ProductKey;

/// Keyed byte store for encoded product payloads
pub struct Storage {
    db: DB,
    read_only: bool,
}

impl Storage {
    /// Open storage at the given path, creating if necessary
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        // Bulk imports write large sorted-ish batches
        db_opts.increase_parallelism(4);
        db_opts.set_max_background_jobs(4);

        let cf_descriptors = build_cf_descriptors();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        Ok(Self {
            db,
            read_only: false,
        })
    }

    /// Open an existing store without write access (serving processes)
    pub fn open_read_only(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage read-only at {:?}", path);

        let db_opts = Options::default();
        let db = DB::open_cf_for_read_only(&db_opts, path, ALL_CF_NAMES.iter().copied(), false)?;

        Ok(Self {
            db,
            read_only: true,
        })
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn products_cf(&self) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(CF_PRODUCTS)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(CF_PRODUCTS.to_string()))
    }

    fn ensure_writable(&self) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::ReadOnly);
        }
        Ok(())
    }

    /// Store a product payload, replacing any previous value for the barcode
    pub fn put_product(&self, key: &ProductKey, payload: &[u8]) -> Result<(), StorageError> {
        self.ensure_writable()?;
        let cf = self.products_cf()?;
        self.db.put_cf(cf, key.to_bytes(), payload)?;
        debug!(barcode = key.barcode(), bytes = payload.len(), "Stored product");
        Ok(())
    }

    /// Get a product payload by barcode
    pub fn get_product(&self, key: &ProductKey) -> Result<Option<Vec<u8>>, StorageError> {
        let cf = self.products_cf()?;
        let result = self.db.get_cf(cf, key.to_bytes())?;
        Ok(result)
    }

    /// Start an empty batch
    pub fn new_batch(&self) -> WriteBatch {
        WriteBatch::default()
    }

    /// Add a product payload to a pending batch
    pub fn batch_put(
        &self,
        batch: &mut WriteBatch,
        key: &ProductKey,
        payload: &[u8],
    ) -> Result<(), StorageError> {
        let cf = self.products_cf()?;
        batch.put_cf(cf, key.to_bytes(), payload);
        Ok(())
    }

    /// Commit a batch atomically
    pub fn write_batch(&self, batch: WriteBatch) -> Result<(), StorageError> {
        self.ensure_writable()?;
        let count = batch.len();
        self.db.write(batch)?;
        debug!(count, "Committed product batch");
        Ok(())
    }

    /// Flush memtables to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.ensure_writable()?;
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.flush_cf(cf)?;
            }
        }
        Ok(())
    }

    /// RocksDB's estimate of stored products (`rocksdb.estimate-num-keys`).
    pub fn estimated_products(&self) -> Result<u64, StorageError> {
        let cf = self.products_cf()?;
        Ok(self
            .db
            .property_int_value_cf(cf, "rocksdb.estimate-num-keys")?
            .unwrap_or(0))
    }
}
