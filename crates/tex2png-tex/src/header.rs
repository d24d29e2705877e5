//! TEX header structures.

use std::fs;
use std::path::Path;

use tex2png_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::codec::Codec;
use crate::{Error, Result, TEX_MAGIC};

/// On-disk layout of the first 0xC0 bytes of a TEX file.
///
/// Only the fields the converter needs are named; everything else is kept as
/// opaque reserved bytes so the struct covers the whole fixed block.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct RawTexHeader {
    /// Magic ("TEX\0").
    pub magic: u32,
    /// Unknown.
    pub reserved0: [u8; 16],
    /// Number of mipmap levels.
    pub mipmap_count: i32,
    /// Width of mip 0.
    pub width: i32,
    /// Height of mip 0.
    pub height: i32,
    /// Unknown.
    pub reserved1: u32,
    /// Block compression selector.
    pub compression_type: i32,
    /// Unknown.
    pub reserved2: [u8; 0x90],
    /// Offset of mip 0 data.
    pub mip0_offset: i64,
}

/// Parsed TEX header.
///
/// Offsets and sizes keep the signed widths they have on disk. Nothing beyond
/// the magic is validated here; bad geometry or offsets are reported when the
/// payload is sliced or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexHeader {
    /// Magic number, always [`TEX_MAGIC`] after a successful parse.
    pub magic: u32,
    /// Number of mip levels stored in the file.
    pub mipmap_count: i32,
    /// Width of mip 0 in pixels.
    pub width: i32,
    /// Height of mip 0 in pixels.
    pub height: i32,
    /// Raw compression type.
    pub compression_type: i32,
    /// Offset of mip 0 data.
    pub payload_offset: i64,
    /// Size of mip 0 data.
    pub payload_size: i32,
}

impl TexHeader {
    /// Files shorter than this are rejected before any field is read.
    pub const MIN_FILE_SIZE: usize = 0xC0;

    /// Parse the header of a complete TEX file held in memory.
    ///
    /// The file length used to size a single-mip payload is `data.len()`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_FILE_SIZE {
            return Err(Error::TooSmall { size: data.len() });
        }

        let mut reader = BinaryReader::new(data);
        let raw: RawTexHeader = reader.read_struct()?;

        let magic = raw.magic;
        if magic != TEX_MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let mipmap_count = raw.mipmap_count;
        let payload_offset = raw.mip0_offset;

        // With more than one level, mip 0 ends where mip 1 begins. The mip 1
        // offset directly follows the mip 0 offset.
        let payload_size = if mipmap_count > 1 {
            let next_offset = reader.read_i64()?;
            next_offset.wrapping_sub(payload_offset) as i32
        } else {
            (data.len() as i64).wrapping_sub(payload_offset) as i32
        };

        let header = Self {
            magic,
            mipmap_count,
            width: raw.width,
            height: raw.height,
            compression_type: raw.compression_type,
            payload_offset,
            payload_size,
        };

        tracing::debug!(?header, file_len = data.len(), "parsed TEX header");

        Ok(header)
    }

    /// Read a file from disk and parse its header.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Block codec selected by the compression type.
    pub fn codec(&self) -> Result<Codec> {
        Codec::from_compression_type(self.compression_type)
    }

    /// Borrow mip 0's compressed bytes out of the file they were parsed from.
    pub fn payload<'a>(&self, data: &'a [u8]) -> Result<&'a [u8]> {
        let out_of_bounds = || Error::PayloadOutOfBounds {
            offset: self.payload_offset,
            size: self.payload_size,
            file_len: data.len(),
        };

        let start = usize::try_from(self.payload_offset).map_err(|_| out_of_bounds())?;
        let size = usize::try_from(self.payload_size).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(size).ok_or_else(out_of_bounds)?;

        data.get(start..end).ok_or_else(out_of_bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_header(mipmap_count: i32, width: i32, height: i32, kind: i32) -> RawTexHeader {
        RawTexHeader {
            magic: TEX_MAGIC,
            reserved0: [0; 16],
            mipmap_count,
            width,
            height,
            reserved1: 0,
            compression_type: kind,
            reserved2: [0; 0x90],
            mip0_offset: 0xC8,
        }
    }

    fn build_file(raw: RawTexHeader, mip1_offset: i64, payload_len: usize) -> Vec<u8> {
        let mut data = raw.as_bytes().to_vec();
        data.extend_from_slice(&mip1_offset.to_le_bytes());
        data.resize(data.len() + payload_len, 0xAB);
        data
    }

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<RawTexHeader>(), TexHeader::MIN_FILE_SIZE);

        let raw = build_header(1, 0x11, 0x22, 0x1F);
        let bytes = raw.as_bytes();
        assert_eq!(&bytes[..4], b"TEX\0");
        assert_eq!(bytes[0x14], 1);
        assert_eq!(bytes[0x18], 0x11);
        assert_eq!(bytes[0x1C], 0x22);
        assert_eq!(bytes[0x24], 0x1F);
        assert_eq!(bytes[0xB8], 0xC8);
    }

    #[test]
    fn test_too_small() {
        let data = vec![0u8; TexHeader::MIN_FILE_SIZE - 1];
        assert!(matches!(
            TexHeader::parse(&data),
            Err(Error::TooSmall { size: 0xBF })
        ));

        // Rejected on size alone, even with a valid magic.
        let mut data = b"TEX\0".to_vec();
        data.resize(16, 0);
        assert!(matches!(TexHeader::parse(&data), Err(Error::TooSmall { size: 16 })));
    }

    #[test]
    fn test_invalid_magic() {
        let mut data = build_file(build_header(1, 4, 4, 0x16), 0, 8);
        data[..4].copy_from_slice(b"DDS ");

        assert!(matches!(
            TexHeader::parse(&data),
            Err(Error::InvalidMagic(0x2053_4444))
        ));
    }

    #[test]
    fn test_single_mip_payload_size() {
        // 0xC0 header + 8 bytes of the unused mip 1 slot + 8 payload bytes.
        let data = build_file(build_header(1, 4, 4, 0x16), 0x1234, 8);
        let header = TexHeader::parse(&data).unwrap();

        assert_eq!(header.mipmap_count, 1);
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 4);
        assert_eq!(header.compression_type, 0x16);
        assert_eq!(header.payload_offset, 0xC8);
        assert_eq!(header.payload_size as usize, data.len() - 0xC8);
        assert_eq!(header.payload(&data).unwrap().len(), 8);
    }

    #[test]
    fn test_multi_mip_payload_size() {
        let data = build_file(build_header(3, 8, 8, 0x1F), 0xC8 + 64, 64 + 16 + 16);
        let header = TexHeader::parse(&data).unwrap();

        assert_eq!(header.mipmap_count, 3);
        assert_eq!(header.payload_size, 64);
        assert_ne!(header.payload_size as usize, data.len() - 0xC8);
        assert_eq!(header.payload(&data).unwrap(), &data[0xC8..0xC8 + 64]);
    }

    #[test]
    fn test_multi_mip_missing_next_offset() {
        let data = build_header(2, 4, 4, 0x16).as_bytes().to_vec();
        assert!(matches!(TexHeader::parse(&data), Err(Error::Common(_))));
    }

    #[test]
    fn test_payload_out_of_bounds() {
        let data = build_file(build_header(2, 4, 4, 0x16), 0xC8 + 4096, 8);
        let header = TexHeader::parse(&data).unwrap();

        assert!(matches!(
            header.payload(&data),
            Err(Error::PayloadOutOfBounds { size: 4096, .. })
        ));

        let mut raw = build_header(1, 4, 4, 0x16);
        raw.mip0_offset = -8;
        let data = build_file(raw, 0, 8);
        let header = TexHeader::parse(&data).unwrap();
        assert!(header.payload(&data).is_err());
    }

    #[test]
    fn test_codec_lookup() {
        let data = build_file(build_header(1, 4, 4, 0x01), 0, 8);
        let header = TexHeader::parse(&data).unwrap();

        assert!(matches!(header.codec(), Err(Error::UnsupportedFormat(0x01))));
    }
}
