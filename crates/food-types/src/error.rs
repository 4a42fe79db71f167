//! Error types shared across the fastfood crates.

use thiserror::Error;

/// Failures loading settings or reading and writing a manifest.
#[derive(Debug, Error)]
pub enum FoodError {
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Manifest JSON could not be parsed or produced
    #[error("manifest JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while decoding a stored product payload.
///
/// Encoding never fails; every variant here means the stored bytes are
/// corrupt or were written by an incompatible schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Payload was written with a schema this codec does not understand
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u64),

    /// Payload ended before the named field was complete
    #[error("truncated payload while reading {0}")]
    Truncated(&'static str),

    /// Varint for the named field does not fit in 64 bits
    #[error("varint overflow while reading {0}")]
    VarintOverflow(&'static str),

    /// Name bytes are not valid UTF-8
    #[error("name is not valid UTF-8: {0}")]
    InvalidName(#[from] std::str::Utf8Error),

    /// Extra bytes after the last field
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),
}
