//! EDDS compressed texture container decoding.
//!
//! EDDS files carry an ordinary DDS header followed by a table of tagged
//! blocks and then the block payloads themselves:
//!
//! - `COPY` blocks - payload stored uncompressed
//! - `LZ4 ` blocks - payload split into sub-chunks compressed with a
//!   dictionary-carrying (chained) variant of LZ4
//!
//! This crate reconstructs the original DDS byte stream from such a file.
//!
//! # Example
//!
//! ```no_run
//! let data = std::fs::read("texture.edds")?;
//! let dds = edds_format::decompress_edds(&data)?;
//! std::fs::write("texture.dds", &dds)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod blocks;
mod container;
mod decode;
mod error;
mod lz4;

pub use blocks::{BlockTable, COPY_TAG, LZ4_TAG};
pub use container::{
    DdsHeader, DdsHeaderDx10, DdsPixelFormat, FourCC, TexturePrefix, DX10_HEADER_SIZE, HEADER_SIZE,
};
pub use decode::decompress_edds;
pub use error::{Error, Result};
pub use lz4::ChainDecoder;

/// Maximum decoded size of one LZ4 sub-chunk, and the size of the sliding
/// dictionary window carried across sub-chunks within a block.
pub const LZ4_WINDOW_SIZE: usize = 64 * 1024;
