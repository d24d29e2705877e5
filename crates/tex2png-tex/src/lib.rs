//! TEX texture container handling.
//!
//! A TEX file starts with a fixed 0xC0 byte header (magic `TEX\0`) holding the
//! dimensions, mip count and block compression type, followed by a table of
//! mip offsets and the block-compressed mip data. This crate parses the header
//! and decodes mip 0 in software:
//!
//! | compression type | codec |
//! |---|---|
//! | `0x16`, `0x17` | BC1 |
//! | `0x1A` | BC5 |
//! | `0x1F` | BC7 |
//!
//! # Example
//!
//! ```no_run
//! use tex2png_tex::convert_file;
//!
//! let summary = convert_file("path/to/texture.tex", "texture.png")?;
//! println!("{}x{}", summary.header.width, summary.header.height);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod convert;
mod decode;
mod decoded;
mod error;
mod header;

pub use codec::Codec;
pub use convert::{convert_file, decode_tex, ConvertSummary, DecodedTex};
pub use decode::decode_blocks;
pub use decoded::DecodedImage;
pub use error::{Error, Result};
pub use header::{RawTexHeader, TexHeader};

/// TEX file magic ("TEX\0" read as a little-endian u32).
pub const TEX_MAGIC: u32 = 0x0058_4554;

