//! Key encoding for the products column family.
//!
//! Keys are the raw UTF-8 barcode bytes. Barcodes are validated on
//! construction so nothing empty or oversized ever reaches RocksDB.

use food_types::check_barcode;

use crate::error::StorageError;

/// Key for a product payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductKey {
    barcode: String,
}

impl ProductKey {
    /// Create a key, rejecting empty or over-long barcodes
    pub fn new(barcode: impl Into<String>) -> Result<Self, StorageError> {
        let barcode = barcode.into();
        check_barcode(&barcode)?;
        Ok(Self { barcode })
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Encode key to bytes for storage
    pub fn to_bytes(&self) -> Vec<u8> {
        self.barcode.as_bytes().to_vec()
    }
}
