//! EDDS to PNG conversion.
//!
//! Ties the pipeline together for one file: decompress the EDDS container
//! into a DDS byte stream ([`edds_format`]), parse it with `ddsfile`,
//! validate that the texture is 32-bit RGBA, and encode the top-level image
//! as a PNG next to the input.
//!
//! # Example
//!
//! ```no_run
//! let output = edds_convert::convert_file("textures/icon.edds".as_ref())?;
//! println!("wrote {}", output.display());
//! # Ok::<(), edds_convert::Error>(())
//! ```

mod error;

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use ddsfile::{D3DFormat, Dds, DxgiFormat};
use image::{ImageFormat, RgbaImage};

pub use error::{Error, Result};

/// Byte order of a supported 32-bit RGBA texture in DDS pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PixelLayout {
    /// Bytes are R, G, B, A (`D3DFMT_A8B8G8R8`, `DXGI R8G8B8A8_UNORM`).
    Rgba8,
    /// Bytes are B, G, R, A (`D3DFMT_A8R8G8B8`, `DXGI B8G8R8A8_UNORM`).
    Bgra8,
}

impl PixelLayout {
    /// Classify the texture's pixel format, rejecting everything that is
    /// not uncompressed 32-bit RGBA.
    fn detect(dds: &Dds) -> Result<Self> {
        if let Some(format) = dds.get_d3d_format() {
            return match format {
                D3DFormat::A8B8G8R8 => Ok(Self::Rgba8),
                D3DFormat::A8R8G8B8 => Ok(Self::Bgra8),
                other => Err(Error::UnsupportedPixelFormat(format!("{other:?}"))),
            };
        }

        if let Some(format) = dds.get_dxgi_format() {
            return match format {
                DxgiFormat::R8G8B8A8_UNorm | DxgiFormat::R8G8B8A8_UNorm_sRGB => Ok(Self::Rgba8),
                DxgiFormat::B8G8R8A8_UNorm | DxgiFormat::B8G8R8A8_UNorm_sRGB => Ok(Self::Bgra8),
                other => Err(Error::UnsupportedPixelFormat(format!("{other:?}"))),
            };
        }

        Err(Error::UnsupportedPixelFormat("unrecognized format".into()))
    }

    /// Extract the top-level image as tightly packed RGBA bytes.
    ///
    /// `raw` may carry trailing mipmap data; only `width * height * 4`
    /// bytes are taken.
    fn rgba_pixels(self, raw: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let stride = width as usize * 4;
        let expected = stride * height as usize;
        if raw.len() < expected {
            return Err(Error::PixelData {
                expected,
                actual: raw.len(),
            });
        }

        let mut pixels = raw[..expected].to_vec();
        if self == Self::Bgra8 {
            for px in pixels.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
        }
        Ok(pixels)
    }
}

/// Convert one EDDS file to a PNG at the same path with the extension
/// replaced.
///
/// The PNG is encoded into memory first and written with a single
/// `fs::write`, so a failed conversion never leaves a partial output file
/// behind.
pub fn convert_file(input: &Path) -> Result<PathBuf> {
    let data = fs::read(input)?;
    let dds_bytes = edds_format::decompress_edds(&data)?;

    let dds = Dds::read(Cursor::new(dds_bytes.as_slice()))?;
    let width = dds.get_width();
    let height = dds.get_height();

    let layout = PixelLayout::detect(&dds)?;
    let pixels = layout.rgba_pixels(dds.get_data(0)?, width, height)?;

    let image = RgbaImage::from_raw(width, height, pixels).ok_or(Error::PixelData {
        expected: width as usize * height as usize * 4,
        actual: 0,
    })?;

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    let output = input.with_extension("png");
    fs::write(&output, png)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use ddsfile::NewD3dParams;
    use edds_format::COPY_TAG;

    use super::*;

    /// Write `pixel_data` into a fresh DDS of the given format and wrap
    /// the result as a single-COPY-block EDDS file.
    fn make_edds(format: D3DFormat, width: u32, height: u32, pixel_data: &[u8]) -> Vec<u8> {
        let mut dds = Dds::new_d3d(NewD3dParams {
            height,
            width,
            depth: None,
            format,
            mipmap_levels: None,
            caps2: None,
        })
        .unwrap();
        dds.data = pixel_data.to_vec();

        let mut dds_bytes = Vec::new();
        dds.write(&mut dds_bytes).unwrap();

        let (header, payload) = dds_bytes.split_at(edds_format::HEADER_SIZE);
        let mut edds = header.to_vec();
        edds.extend_from_slice(COPY_TAG);
        edds.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        edds.extend_from_slice(payload);
        edds
    }

    #[test]
    fn test_convert_rgba_texture() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.edds");

        // 2x2 A8B8G8R8: bytes already in RGBA order.
        let pixels: Vec<u8> = vec![
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            255, 255, 255, 128, // translucent white
        ];
        std::fs::write(&input, make_edds(D3DFormat::A8B8G8R8, 2, 2, &pixels)).unwrap();

        let output = convert_file(&input).unwrap();
        assert_eq!(output, dir.path().join("tex.png"));

        let decoded = image::open(&output).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_convert_bgra_texture_swizzles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.edds");

        // 1x1 A8R8G8B8: bytes are B, G, R, A.
        let bgra = vec![10u8, 20, 30, 40];
        std::fs::write(&input, make_edds(D3DFormat::A8R8G8B8, 1, 1, &bgra)).unwrap();

        let output = convert_file(&input).unwrap();
        let decoded = image::open(&output).unwrap().into_rgba8();
        assert_eq!(decoded.into_raw(), vec![30, 20, 10, 40]);
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.edds");

        // 4x4 DXT1: one 8-byte block.
        std::fs::write(&input, make_edds(D3DFormat::DXT1, 4, 4, &[0u8; 8])).unwrap();

        let result = convert_file(&input);
        assert!(matches!(result, Err(Error::UnsupportedPixelFormat(_))));
        assert!(!dir.path().join("tex.png").exists());
    }

    #[test]
    fn test_header_only_file_is_collaborator_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tex.edds");

        // 128 zero bytes decode to themselves but are not a valid DDS.
        std::fs::write(&input, vec![0u8; edds_format::HEADER_SIZE]).unwrap();

        assert!(matches!(convert_file(&input), Err(Error::Dds(_))));
        assert!(!dir.path().join("tex.png").exists());
    }
}
