//! TEX to PNG file conversion.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::Codec;
use crate::decode::decode_blocks;
use crate::decoded::DecodedImage;
use crate::header::TexHeader;
use crate::Result;

/// Mip 0 of a TEX file with the header it was decoded from.
#[derive(Debug, Clone)]
pub struct DecodedTex {
    /// Parsed header.
    pub header: TexHeader,
    /// Codec the payload was decoded with.
    pub codec: Codec,
    /// Decoded pixels.
    pub image: DecodedImage,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Header of the source file.
    pub header: TexHeader,
    /// Codec the payload was decoded with.
    pub codec: Codec,
    /// Where the PNG was written.
    pub output: PathBuf,
}

/// Decode mip 0 of an in-memory TEX file.
///
/// The codec is resolved before the payload is sliced, so an unknown
/// compression type never reaches the decoder.
pub fn decode_tex(data: &[u8]) -> Result<DecodedTex> {
    let header = TexHeader::parse(data)?;
    let codec = header.codec()?;
    let payload = header.payload(data)?;
    let image = decode_blocks(codec, header.width, header.height, payload)?;

    Ok(DecodedTex {
        header,
        codec,
        image,
    })
}

/// Convert a TEX file to PNG.
///
/// The destination's parent directory must already exist. Nothing is written
/// unless decoding and encoding both succeed.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<ConvertSummary> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let data = fs::read(source)?;
    let DecodedTex {
        header,
        codec,
        image,
    } = decode_tex(&data)?;
    // The compressed file buffer is no longer needed once decoded.
    drop(data);

    image.save_png(destination)?;

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        pixels = image.pixel_count(),
        "wrote PNG"
    );

    Ok(ConvertSummary {
        header,
        codec,
        output: destination.to_path_buf(),
    })
}
