//! Errors raised by the name index.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search engine error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `open_existing` found no index at the path
    #[error("no name index at {0}")]
    IndexNotFound(String),

    /// The on-disk index lacks a field this crate needs
    #[error("name index schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The writer mutex was poisoned by a panicking holder
    #[error("name index writer unavailable: {0}")]
    IndexLocked(String),

    #[error("name index is open read-only")]
    ReadOnly,
}
