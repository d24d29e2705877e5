//! Block decompression of mip 0 using bcdec_rs.

use crate::codec::Codec;
use crate::decoded::DecodedImage;
use crate::{Error, Result};

/// Bytes per decoded RGBA pixel.
const PIXEL_SIZE: usize = 4;

/// Row pitch of a decoded 4x4 RGBA block.
const BLOCK_PITCH: usize = Codec::BLOCK_DIM * PIXEL_SIZE;

/// Decode a block-compressed surface into RGBA pixels.
///
/// Blocks are laid out row-major; partial blocks on the right and bottom edge
/// are clipped. Bytes past the last block are ignored.
pub fn decode_blocks(codec: Codec, width: i32, height: i32, data: &[u8]) -> Result<DecodedImage> {
    if width <= 0 || height <= 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    let (width, height) = (width as usize, height as usize);

    let expected = codec.surface_size(width, height);
    if data.len() < expected {
        return Err(Error::PayloadTooSmall {
            expected,
            actual: data.len(),
        });
    }

    tracing::debug!(%codec, width, height, payload_len = data.len(), "decoding blocks");

    let blocks_x = width.div_ceil(Codec::BLOCK_DIM);
    let block_size = codec.block_size();

    let mut pixels = vec![0u8; width * height * PIXEL_SIZE];
    let mut block_rgba = [0u8; BLOCK_PITCH * Codec::BLOCK_DIM];

    for (index, block) in data[..expected].chunks_exact(block_size).enumerate() {
        decode_block(codec, block, &mut block_rgba);

        let bx = (index % blocks_x) * Codec::BLOCK_DIM;
        let by = (index / blocks_x) * Codec::BLOCK_DIM;
        let cols = Codec::BLOCK_DIM.min(width - bx);
        let rows = Codec::BLOCK_DIM.min(height - by);

        for row in 0..rows {
            let src = row * BLOCK_PITCH;
            let dst = ((by + row) * width + bx) * PIXEL_SIZE;
            let len = cols * PIXEL_SIZE;
            pixels[dst..dst + len].copy_from_slice(&block_rgba[src..src + len]);
        }
    }

    Ok(DecodedImage::from_rgba(width as u32, height as u32, pixels))
}

/// Decode one compressed block into a 4x4 RGBA block.
fn decode_block(codec: Codec, block: &[u8], out: &mut [u8; BLOCK_PITCH * Codec::BLOCK_DIM]) {
    match codec {
        Codec::Bc1 => bcdec_rs::bc1(block, out, BLOCK_PITCH),
        Codec::Bc7 => bcdec_rs::bc7(block, out, BLOCK_PITCH),
        Codec::Bc5 => {
            // bcdec writes two bytes per pixel for BC5
            let mut rg = [0u8; 2 * Codec::BLOCK_DIM * Codec::BLOCK_DIM];
            bcdec_rs::bc5(block, &mut rg, 2 * Codec::BLOCK_DIM, false);

            for (pixel, channels) in out.chunks_exact_mut(PIXEL_SIZE).zip(rg.chunks_exact(2)) {
                pixel.copy_from_slice(&[channels[0], channels[1], 0, 0xFF]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// BC1 block with both endpoints white (0xFFFF) and all indices 0.
    const BC1_WHITE: [u8; 8] = [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0];

    #[test]
    fn test_bc1_black_block() {
        let image = decode_blocks(Codec::Bc1, 4, 4, &[0u8; 8]).unwrap();

        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 4);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(image.argb(x, y), 0xFF00_0000);
            }
        }
    }

    #[test]
    fn test_bc1_transparent_index() {
        // color0 <= color1 selects 3-color mode, where index 3 is transparent black.
        let block = [0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let image = decode_blocks(Codec::Bc1, 4, 4, &block).unwrap();

        assert!(image.as_rgba().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bc5_fills_blue_and_alpha() {
        // Red and green endpoints both 0xFF, all indices 0.
        let mut block = [0u8; 16];
        block[0] = 0xFF;
        block[1] = 0xFF;
        block[8] = 0xFF;
        block[9] = 0xFF;

        let image = decode_blocks(Codec::Bc5, 4, 4, &block).unwrap();
        for pixel in image.as_rgba().chunks_exact(4) {
            assert_eq!(pixel, &[0xFF, 0xFF, 0x00, 0xFF]);
        }
    }

    #[test]
    fn test_edge_blocks_are_clipped() {
        // 6x5 needs a 2x2 grid of blocks; block 1 (top right) is white.
        let mut data = vec![0u8; 4 * 8];
        data[8..16].copy_from_slice(&BC1_WHITE);

        let image = decode_blocks(Codec::Bc1, 6, 5, &data).unwrap();
        assert_eq!(image.as_rgba().len(), 6 * 5 * 4);
        assert_eq!(image.argb(3, 0), 0xFF00_0000);
        assert_eq!(image.argb(4, 0), 0xFFFF_FFFF);
        assert_eq!(image.argb(5, 3), 0xFFFF_FFFF);
        assert_eq!(image.argb(5, 4), 0xFF00_0000);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&BC1_WHITE);

        let image = decode_blocks(Codec::Bc1, 4, 4, &data).unwrap();
        assert_eq!(image.argb(0, 0), 0xFF00_0000);
    }

    #[test]
    fn test_payload_too_small() {
        assert!(matches!(
            decode_blocks(Codec::Bc7, 8, 8, &[0u8; 48]),
            Err(Error::PayloadTooSmall { expected: 64, actual: 48 })
        ));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            decode_blocks(Codec::Bc1, 0, 4, &[0u8; 8]),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(matches!(
            decode_blocks(Codec::Bc1, 4, -4, &[0u8; 8]),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}
