//! Storage error types.

use thiserror::Error;

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot header: {0}")]
    InvalidHeader(String),

    #[error("unsupported snapshot format version: {0}")]
    UnsupportedVersion(u8),

    #[error("snapshot corruption: crc mismatch (expected {expected:08x}, actual {actual:08x})")]
    Corruption { expected: u32, actual: u32 },

    #[error("snapshot too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}
