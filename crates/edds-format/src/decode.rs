//! EDDS to DDS reconstruction.

use edds_common::BinaryReader;

use crate::blocks::BlockTable;
use crate::container::TexturePrefix;
use crate::{lz4, Result};

/// Decompress an EDDS file into the DDS byte stream it encodes.
///
/// Reads the verbatim header prefix, scans the block table, materializes
/// the `COPY` payloads and decodes the `LZ4 ` payloads (in that order;
/// copy payloads precede compressed payloads in the stream), then
/// assembles the output. Bytes after the last recognized block are
/// ignored.
pub fn decompress_edds(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(data);

    let prefix = TexturePrefix::read(&mut reader)?;
    let table = BlockTable::scan(&mut reader)?;

    let mut copy_payloads: Vec<&[u8]> = Vec::with_capacity(table.copy.len());
    for &size in &table.copy {
        copy_payloads.push(reader.read_bytes(size as usize)?);
    }

    let mut lz4_payloads: Vec<Vec<u8>> = Vec::with_capacity(table.lz4.len());
    for &size in &table.lz4 {
        lz4_payloads.push(lz4::decode_block(&mut reader, size)?);
    }

    Ok(assemble(&prefix, &copy_payloads, &lz4_payloads))
}

/// Assemble the final DDS stream.
///
/// Each payload is prepended to the front of the accumulator in scan
/// order: copy blocks first, then LZ4 blocks, then the DX10 extension and
/// the fixed header. Every group therefore lands in reverse scan order,
/// with the headers first. The original tool built the stream exactly this
/// way, and files only round-trip if the order is kept.
fn assemble(prefix: &TexturePrefix<'_>, copy: &[&[u8]], lz4: &[Vec<u8>]) -> Vec<u8> {
    let total = prefix.header.len()
        + prefix.dx10.map_or(0, <[u8]>::len)
        + copy.iter().map(|p| p.len()).sum::<usize>()
        + lz4.iter().map(|p| p.len()).sum::<usize>();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(prefix.header);
    if let Some(dx10) = prefix.dx10 {
        out.extend_from_slice(dx10);
    }
    for payload in lz4.iter().rev() {
        out.extend_from_slice(payload);
    }
    for payload in copy.iter().rev() {
        out.extend_from_slice(payload);
    }
    out
}
