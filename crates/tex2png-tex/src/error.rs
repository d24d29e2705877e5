//! Error types for TEX handling.

use thiserror::Error;

/// Errors that can occur when working with TEX files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] tex2png_common::Error),

    /// File is shorter than the fixed header.
    #[error("file too small to be valid: {size} bytes (need at least {min})", min = crate::TexHeader::MIN_FILE_SIZE)]
    TooSmall { size: usize },

    /// Invalid TEX magic.
    #[error("invalid TEX magic: expected 'TEX\\0', got {0:#010x}")]
    InvalidMagic(u32),

    /// Compression type with no known block codec.
    #[error("unknown texture format {0:#x}")]
    UnsupportedFormat(i32),

    /// Non-positive width or height.
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Payload range does not fit inside the file.
    #[error("payload at offset {offset} with size {size} exceeds file length {file_len}")]
    PayloadOutOfBounds {
        offset: i64,
        size: i32,
        file_len: usize,
    },

    /// Payload holds fewer bytes than the block grid requires.
    #[error("payload too small: expected {expected} bytes, got {actual}")]
    PayloadTooSmall { expected: usize, actual: usize },

    /// PNG encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for TEX operations.
pub type Result<T> = std::result::Result<T, Error>;
