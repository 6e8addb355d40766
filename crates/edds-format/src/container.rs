//! DDS header structures and the verbatim EDDS file prefix.
//!
//! An EDDS file starts with the same bytes a plain DDS file would: the
//! four-byte magic plus a 124-byte header, optionally followed by the
//! 20-byte DX10 extension. These bytes are copied into the reconstructed
//! output untouched; the header is only parsed far enough to decide whether
//! the DX10 extension is present.

use edds_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::Result;

/// Size of the fixed file prefix: magic plus [`DdsHeader`].
pub const HEADER_SIZE: usize = 128;

/// Size of the DX10 extended header.
pub const DX10_HEADER_SIZE: usize = 20;

/// DDS file header (the 124 bytes following the magic).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Check if the file carries a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.four_cc == FourCC::DX10
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DX10 extended header marker.
    pub const DX10: Self = Self(*b"DX10");
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDx10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

/// The verbatim header bytes at the front of an EDDS file.
///
/// Both slices borrow from the input buffer and are copied into the
/// reconstructed DDS stream unchanged.
#[derive(Debug, Clone, Copy)]
pub struct TexturePrefix<'a> {
    /// Magic plus fixed header, always 128 bytes.
    pub header: &'a [u8],
    /// DX10 extension, present iff the pixel-format four-CC is `DX10`.
    pub dx10: Option<&'a [u8]>,
}

impl<'a> TexturePrefix<'a> {
    /// Read the file prefix, advancing the reader past whichever headers
    /// are present.
    ///
    /// The magic is not validated; the prefix is treated as opaque bytes
    /// apart from the four-CC probe.
    pub fn read(reader: &mut BinaryReader<'a>) -> Result<Self> {
        let header = reader.read_bytes(HEADER_SIZE)?;

        let mut fields = BinaryReader::new(&header[4..]);
        let parsed: DdsHeader = fields.read_struct()?;

        let dx10 = if parsed.is_dx10() {
            Some(reader.read_bytes(DX10_HEADER_SIZE)?)
        } else {
            None
        };

        Ok(Self { header, dx10 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_header() -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[..4].copy_from_slice(b"DDS ");
        bytes[4..8].copy_from_slice(&124u32.to_le_bytes());
        bytes
    }

    #[test]
    fn test_plain_prefix() {
        let data = plain_header();
        let mut reader = BinaryReader::new(&data);

        let prefix = TexturePrefix::read(&mut reader).unwrap();
        assert_eq!(prefix.header, &data[..]);
        assert!(prefix.dx10.is_none());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_dx10_prefix() {
        let mut data = plain_header();
        data[84..88].copy_from_slice(b"DX10");
        data.extend_from_slice(&[0xABu8; DX10_HEADER_SIZE]);

        let mut reader = BinaryReader::new(&data);
        let prefix = TexturePrefix::read(&mut reader).unwrap();

        assert_eq!(prefix.dx10.unwrap(), &[0xABu8; DX10_HEADER_SIZE]);
        assert_eq!(reader.position(), HEADER_SIZE + DX10_HEADER_SIZE);
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0u8; HEADER_SIZE - 1];
        let mut reader = BinaryReader::new(&data);

        assert!(TexturePrefix::read(&mut reader).is_err());
    }
}
