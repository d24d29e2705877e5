//! Compression type to block codec mapping.

use std::fmt;

use crate::{Error, Result};

/// Block compression codecs found in TEX files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// BC1 / DXT1 with 1-bit alpha, 8 bytes per 4x4 block.
    Bc1,
    /// BC5 / RGTC2 two-channel, 16 bytes per 4x4 block.
    Bc5,
    /// BC7 / BPTC RGBA, 16 bytes per 4x4 block.
    Bc7,
}

impl Codec {
    /// Width and height of a compressed block in pixels.
    pub const BLOCK_DIM: usize = 4;

    /// Map a raw TEX compression type to its codec.
    ///
    /// The set is closed; anything else is [`Error::UnsupportedFormat`].
    pub fn from_compression_type(kind: i32) -> Result<Self> {
        match kind {
            0x16 | 0x17 => Ok(Self::Bc1),
            0x1A => Ok(Self::Bc5),
            0x1F => Ok(Self::Bc7),
            other => Err(Error::UnsupportedFormat(other)),
        }
    }

    /// Block size in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Bc1 => 8,
            Self::Bc5 | Self::Bc7 => 16,
        }
    }

    /// Bytes needed to hold one full mip level of `width` x `height` pixels.
    pub fn surface_size(self, width: usize, height: usize) -> usize {
        let blocks_x = width.div_ceil(Self::BLOCK_DIM);
        let blocks_y = height.div_ceil(Self::BLOCK_DIM);
        blocks_x * blocks_y * self.block_size()
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bc1 => "BC1",
            Self::Bc5 => "BC5",
            Self::Bc7 => "BC7",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        assert_eq!(Codec::from_compression_type(0x16).unwrap(), Codec::Bc1);
        assert_eq!(Codec::from_compression_type(0x17).unwrap(), Codec::Bc1);
        assert_eq!(Codec::from_compression_type(0x1A).unwrap(), Codec::Bc5);
        assert_eq!(Codec::from_compression_type(0x1F).unwrap(), Codec::Bc7);

        for kind in [0x00, 0x01, 0x18, 0x19, 0x1B, 0x20, -1] {
            assert!(matches!(
                Codec::from_compression_type(kind),
                Err(Error::UnsupportedFormat(k)) if k == kind
            ));
        }
    }

    #[test]
    fn test_surface_size() {
        // 4x4 block minimum
        assert_eq!(Codec::Bc1.surface_size(1, 1), 8);
        assert_eq!(Codec::Bc7.surface_size(4, 4), 16);
        assert_eq!(Codec::Bc5.surface_size(5, 3), 32);
        assert_eq!(Codec::Bc1.surface_size(1024, 512), 256 * 128 * 8);
    }
}
