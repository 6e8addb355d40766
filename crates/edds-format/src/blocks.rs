//! Block table scanning.
//!
//! After the header prefix, an EDDS file lists its blocks as `tag + size`
//! pairs. The table ends at the first tag that is neither `COPY` nor
//! `LZ4 `; the payload bytes for all listed blocks start right there.

use edds_common::BinaryReader;

use crate::Result;

/// Tag of a block stored uncompressed.
pub const COPY_TAG: &[u8; 4] = b"COPY";

/// Tag of a block compressed as a chained-LZ4 sub-chunk stream.
/// Note the trailing space.
pub const LZ4_TAG: &[u8; 4] = b"LZ4 ";

/// Declared block sizes, grouped by kind, in scan order within each kind.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BlockTable {
    /// Payload sizes of `COPY` blocks.
    pub copy: Vec<u32>,
    /// Declared sizes of `LZ4 ` blocks (uncompressed-size field plus
    /// sub-chunk stream).
    pub lz4: Vec<u32>,
}

impl BlockTable {
    /// Scan `tag + size` pairs from the current position.
    ///
    /// Stops at the first unrecognized tag, leaving the reader positioned
    /// on it (8 bytes rewound), or when fewer than 8 bytes remain.
    pub fn scan(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let mut table = Self::default();

        while reader.remaining() >= 8 {
            let mark = reader.position();
            let tag = reader.read_bytes(4)?;
            let size = reader.read_i32()? as u32;

            if tag == COPY_TAG {
                table.copy.push(size);
            } else if tag == LZ4_TAG {
                table.lz4.push(size);
            } else {
                reader.seek(mark);
                break;
            }
        }

        Ok(table)
    }

    /// Total number of blocks listed in the table.
    pub fn len(&self) -> usize {
        self.copy.len() + self.lz4.len()
    }

    /// Check if the table lists no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.copy.is_empty() && self.lz4.is_empty()
    }
}
