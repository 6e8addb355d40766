//! Chained LZ4 block decoding.
//!
//! An `LZ4 ` block stores its payload as a sequence of sub-chunks, each at
//! most 64 KiB once decoded. The sub-chunks are not independent: a chunk may
//! back-reference bytes decoded by earlier chunks of the same block, so the
//! decoder carries a sliding dictionary window from chunk to chunk. Window
//! state never crosses block boundaries.

use edds_common::BinaryReader;
use lz4_flex::block::{decompress_into, decompress_into_with_dict};

use crate::{Error, Result, LZ4_WINDOW_SIZE};

/// An LZ4 decoder that retains up to 64 KiB of previously decoded bytes as
/// the dictionary for subsequent decode calls.
#[derive(Debug, Default)]
pub struct ChainDecoder {
    window: Vec<u8>,
}

impl ChainDecoder {
    /// Create a decoder with an empty dictionary window.
    pub fn new() -> Self {
        Self {
            window: Vec::with_capacity(LZ4_WINDOW_SIZE),
        }
    }

    /// Decode one raw LZ4 sub-chunk into `output`, consulting the window
    /// carried over from earlier sub-chunks.
    ///
    /// Returns the number of decoded bytes written to the front of
    /// `output`. The decoded bytes become part of the window for the next
    /// call.
    pub fn decode(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let decoded = if self.window.is_empty() {
            decompress_into(input, output)
        } else {
            decompress_into_with_dict(input, output, &self.window)
        }
        .map_err(|e| Error::Decompression(e.to_string()))?;

        self.retain(&output[..decoded]);
        Ok(decoded)
    }

    // Keep the most recent LZ4_WINDOW_SIZE bytes of decoded history.
    fn retain(&mut self, decoded: &[u8]) {
        if decoded.len() >= LZ4_WINDOW_SIZE {
            self.window.clear();
            self.window
                .extend_from_slice(&decoded[decoded.len() - LZ4_WINDOW_SIZE..]);
            return;
        }

        let keep = LZ4_WINDOW_SIZE - decoded.len();
        if self.window.len() > keep {
            let excess = self.window.len() - keep;
            self.window.drain(..excess);
        }
        self.window.extend_from_slice(decoded);
    }
}

/// Decode one `LZ4 ` block from the reader.
///
/// The block starts with its total uncompressed size, followed by
/// `[length][bytes]` sub-chunks until `block_len` bytes (size field
/// included) have been consumed. The top bit of each sub-chunk length is
/// reserved and masked off.
pub(crate) fn decode_block(reader: &mut BinaryReader<'_>, block_len: u32) -> Result<Vec<u8>> {
    let declared = reader.read_u32()? as usize;
    let mut target = vec![0u8; declared];
    let mut written = 0usize;

    let mut decoder = ChainDecoder::new();
    let mut scratch = vec![0u8; LZ4_WINDOW_SIZE];

    let payload_len = (block_len as usize).saturating_sub(4);
    let mut consumed = 0usize;

    while consumed < payload_len {
        let chunk_len = (reader.read_i32()? & i32::MAX) as usize;
        let chunk = reader.read_bytes(chunk_len)?;

        let decoded = decoder.decode(chunk, &mut scratch)?;
        if written + decoded > declared {
            return Err(Error::BlockOverflow {
                declared,
                decoded: written + decoded,
            });
        }

        target[written..written + decoded].copy_from_slice(&scratch[..decoded]);
        written += decoded;
        consumed += chunk_len + 4;
    }

    Ok(target)
}
