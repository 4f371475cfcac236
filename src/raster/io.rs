//! PNG and TGA persistence for the RGB canvas

use std::fs;
use std::path::Path;

use image::ImageFormat;
use log::info;

use super::{Color, Image};
use crate::error::{Error, Result};

/// Uncompressed, unmapped RGB (image type 2)
const TGA_SIGNATURE: [u8; 12] = [0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const TGA_SPEC_LEN: usize = 6;
const TGA_HEADER_LEN: usize = TGA_SIGNATURE.len() + TGA_SPEC_LEN;

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    if bytes.is_empty() {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }
    Ok(bytes)
}

impl Image {
    /// Load a PNG file, normalized to 8-bit RGB
    pub fn load_png(path: impl AsRef<Path>, flip_y: bool) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        Self::decode_png(&bytes, flip_y)
    }

    /// Decode PNG bytes. Any alpha channel is dropped.
    pub fn decode_png(bytes: &[u8], flip_y: bool) -> Result<Self> {
        let rgb = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.into_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
            .collect();

        // Dimensions come from the decoder, so the length always matches
        let mut img = Self::from_pixels(width, height, pixels).unwrap_or_else(|| Self::new(0, 0));
        if flip_y {
            img.flip_y();
        }
        Ok(img)
    }

    /// Load an uncompressed 24/32-bit TGA file
    pub fn load_tga(path: impl AsRef<Path>, flip_y: bool) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::decode_tga(&bytes, flip_y)
    }

    /// Decode TGA bytes. File rows run bottom-to-top and are stored top-to-bottom.
    pub fn decode_tga(bytes: &[u8], flip_y: bool) -> Result<Self> {
        if bytes.len() < TGA_HEADER_LEN || bytes[..TGA_SIGNATURE.len()] != TGA_SIGNATURE {
            return Err(Error::TgaSignature);
        }

        let spec = &bytes[TGA_SIGNATURE.len()..TGA_HEADER_LEN];
        let width = u16::from_le_bytes([spec[0], spec[1]]) as u32;
        let height = u16::from_le_bytes([spec[2], spec[3]]) as u32;
        let depth = spec[4];

        if width == 0 || height == 0 {
            return Err(Error::TgaDimensions { width, height });
        }
        if depth != 24 && depth != 32 {
            return Err(Error::TgaDepth(depth));
        }

        let bytes_per_pixel = depth as usize / 8;
        let expected = width as usize * height as usize * bytes_per_pixel;
        let data = &bytes[TGA_HEADER_LEN..];
        if data.len() < expected {
            return Err(Error::TgaTruncated {
                expected,
                actual: data.len(),
            });
        }

        let mut img = Self::new(width, height);
        for (file_row, row) in data[..expected]
            .chunks_exact(width as usize * bytes_per_pixel)
            .enumerate()
        {
            let y = height - file_row as u32 - 1;
            for (x, px) in row.chunks_exact(bytes_per_pixel).enumerate() {
                img.set_pixel(x as u32, y, Color::from_bgr([px[0], px[1], px[2]]));
            }
        }

        if flip_y {
            img.flip_y();
        }
        Ok(img)
    }

    /// Encode as a 24-bit uncompressed TGA, rows bottom-to-top
    pub fn encode_tga(&self) -> Result<Vec<u8>> {
        let (Ok(width), Ok(height)) = (u16::try_from(self.width()), u16::try_from(self.height()))
        else {
            return Err(Error::TgaTooLarge {
                width: self.width(),
                height: self.height(),
            });
        };

        let mut out = Vec::with_capacity(TGA_HEADER_LEN + self.pixels().len() * 3);
        out.extend_from_slice(&TGA_SIGNATURE);
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.push(24);
        out.push(0);

        let row_len = self.width() as usize;
        if row_len > 0 {
            for row in self.pixels().chunks_exact(row_len).rev() {
                for c in row {
                    out.extend_from_slice(&c.to_bgr());
                }
            }
        }
        Ok(out)
    }

    /// Save as a 24-bit TGA file
    pub fn save_tga(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_tga()?;
        info!("Saving image to: {}", path.display());
        fs::write(path, bytes).map_err(|e| Error::io(path, e))
    }

    /// Pack pixels as tightly packed RGB24 rows, reusing `out`'s allocation
    pub fn to_rgb_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels().len() * 3);
        for c in self.pixels() {
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
    }
}
