//! Decoded pixel buffer and PNG export.

use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::Result;

/// A decoded mip 0 surface.
///
/// Pixels are packed RGBA, row-major, with no row padding. In memory this is
/// the same layout as a little-endian 32-bit ABGR word per pixel; use
/// [`DecodedImage::argb`] for the conventional `0xAARRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    pub(crate) fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 4
    }

    /// Raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)` packed as `0xAARRGGBB`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    pub fn argb(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let [r, g, b, a] = [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ];
        u32::from_be_bytes([a, r, g, b])
    }

    /// Encode as PNG into any writer.
    pub fn write_png<W: std::io::Write>(&self, writer: W) -> Result<()> {
        PngEncoder::new(writer).write_image(
            &self.pixels,
            self.width,
            self.height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }

    /// Encode as PNG into memory.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut png_data = Vec::new();
        self.write_png(&mut png_data)?;
        Ok(png_data)
    }

    /// Encode as PNG and write to `path`.
    ///
    /// The image is encoded in memory first so a failed encode leaves no
    /// partial file behind.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let png_data = self.to_png_bytes()?;
        fs::write(path, png_data)?;
        Ok(())
    }
}
