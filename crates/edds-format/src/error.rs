//! Error types for EDDS decoding.

use thiserror::Error;

/// Errors that can occur when decoding an EDDS container.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream ended before an expected field or payload could be read.
    #[error("truncated input: {0}")]
    Truncated(#[from] edds_common::Error),

    /// The chained LZ4 decoder rejected a sub-chunk.
    #[error("LZ4 decompression failed: {0}")]
    Decompression(String),

    /// A block decoded to more bytes than its declared uncompressed size.
    #[error("block overflows declared size: {declared} bytes declared, {decoded} decoded")]
    BlockOverflow { declared: usize, decoded: usize },
}

/// Result type for EDDS operations.
pub type Result<T> = std::result::Result<T, Error>;
