//! Ingestion error types.
//!
//! Only infrastructure failures are errors; bad records are counted in the
//! run summary instead.

use std::path::PathBuf;

use food_store::StoreError;
use food_types::FoodError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Dump file could not be opened
    #[error("failed to open dump {path}: {source}")]
    OpenDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading or decompressing the dump failed mid-stream
    #[error("failed to read dump: {0}")]
    Read(#[from] std::io::Error),

    /// Store open, batch commit or close failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Manifest could not be written
    #[error("manifest error: {0}")]
    Manifest(#[from] FoodError),
}
