//! Error types for EDDS conversion.

use thiserror::Error;

/// Errors that can occur when converting an EDDS file to PNG.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// EDDS decompression failed.
    #[error("EDDS decoding failed: {0}")]
    Format(#[from] edds_format::Error),

    /// The reconstructed stream is not a valid DDS file.
    #[error("DDS parsing failed: {0}")]
    Dds(#[from] ddsfile::Error),

    /// The texture uses a pixel format other than 32-bit RGBA.
    #[error("unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// The DDS pixel data is shorter than the dimensions require.
    #[error("pixel data too short: expected {expected} bytes, got {actual}")]
    PixelData { expected: usize, actual: usize },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
