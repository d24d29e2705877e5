//! tex2png - TEX texture conversion library.
//!
//! This crate provides a unified interface to the tex2png crates.
//!
//! # Crates
//!
//! - [`tex2png_common`] - Common utilities (bounds-checked binary reading)
//! - [`tex2png_tex`] - TEX header parsing and BC1/BC5/BC7 decoding
//!
//! # Example
//!
//! ```no_run
//! use tex2png::prelude::*;
//!
//! let data = std::fs::read("texture.tex")?;
//! let header = TexHeader::parse(&data)?;
//! println!("{}x{} {}", header.width, header.height, header.codec()?);
//!
//! let decoded = decode_tex(&data)?;
//! decoded.image.save_png("texture.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use tex2png_common as common;
pub use tex2png_tex as tex;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use tex2png_tex::{
        convert_file, decode_tex, Codec, ConvertSummary, DecodedImage, DecodedTex, TexHeader,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
