//! Dual store error types.

use food_search::SearchError;
use food_storage::StorageError;
use food_types::CodecError;
use thiserror::Error;

/// Errors surfaced by the dual store.
///
/// "Not found" is never an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write attempted with an empty barcode
    #[error("barcode is empty")]
    EmptyBarcode,

    /// Write attempted with a barcode over the length limit
    #[error("barcode has {0} characters, maximum is {max}", max = food_types::MAX_BARCODE_LEN)]
    BarcodeTooLong(usize),

    /// Stored payload could not be decoded
    #[error("corrupt record for barcode {barcode}: {source}")]
    Corrupt {
        barcode: String,
        #[source]
        source: CodecError,
    },

    /// Keyed store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Name index failure
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Filesystem error while laying out a data directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A previous flush failed; the batch cannot be used again
    #[error("write batch is poisoned by an earlier failed flush")]
    BatchPoisoned,
}
