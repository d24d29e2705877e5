//! tex2png CLI - converts TEX block-compressed textures to PNG.
//!
//! This is the main entry point for the tex2png command-line application.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use tex2png::prelude::*;
use tex2png::tex;

/// Exit code for malformed command lines.
const EXIT_BAD_ARGUMENTS: i32 = -1;
/// Exit code for rejected inputs.
const EXIT_REJECTED: i32 = -2;
/// Exit code for any other failure.
const EXIT_FAILURE: i32 = 1;

/// tex2png - TEX texture to PNG converter
#[derive(Parser)]
#[command(name = "tex2png")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source TEX file
    source: PathBuf,

    /// Destination PNG file (defaults to the source with a .png extension)
    destination: Option<PathBuf>,

    /// Print the parsed header instead of converting
    #[arg(long)]
    info: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

/// Inputs the converter refuses to process.
#[derive(Debug, Error)]
enum Rejected {
    #[error("{} not found!", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{} too small to be valid!", .0.display())]
    SourceTooSmall(PathBuf),

    #[error("Source and Destination are the same path.")]
    SamePath,

    #[error("{} is not a valid tex file.", .0.display())]
    InvalidFormat(PathBuf),

    #[error("Unknown Texture format {0}.")]
    UnsupportedFormat(i32),
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(EXIT_BAD_ARGUMENTS);
        }
    };

    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("ERROR: {:#}", err);
        let code = if err.is::<Rejected>() {
            EXIT_REJECTED
        } else {
            EXIT_FAILURE
        };
        process::exit(code);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let source = &cli.source;

    let metadata = match fs::metadata(source) {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(Rejected::SourceNotFound(source.clone()).into()),
    };

    if metadata.len() < TexHeader::MIN_FILE_SIZE as u64 {
        return Err(Rejected::SourceTooSmall(source.clone()).into());
    }

    if cli.info {
        return cmd_info(source);
    }

    let destination = cli
        .destination
        .clone()
        .unwrap_or_else(|| source.with_extension("png"));

    if same_path(source, &destination)? {
        return Err(Rejected::SamePath.into());
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tracing::info!("Converting: {} -> {}", source.display(), destination.display());

    let summary = convert_file(source, &destination).map_err(|e| reject(source, e))?;

    tracing::info!(
        "Converted {}x{} {} texture to {}",
        summary.header.width,
        summary.header.height,
        summary.codec,
        summary.output.display()
    );

    Ok(())
}

fn cmd_info(source: &Path) -> Result<()> {
    let header = TexHeader::read_from(source).map_err(|e| reject(source, e))?;

    let codec = match header.codec() {
        Ok(codec) => codec.to_string(),
        Err(_) => "unknown".to_string(),
    };

    println!("File:        {}", source.display());
    println!("Dimensions:  {}x{}", header.width, header.height);
    println!("Mipmaps:     {}", header.mipmap_count);
    println!("Format:      {:#x} ({})", header.compression_type, codec);
    println!("Payload:     {} bytes at {:#x}", header.payload_size, header.payload_offset);

    Ok(())
}

/// Lift the library errors that reject an input into [`Rejected`].
fn reject(source: &Path, err: tex::Error) -> anyhow::Error {
    match err {
        // Only reachable if the file shrinks after the size check in `run`.
        tex::Error::TooSmall { .. } => Rejected::SourceTooSmall(source.to_path_buf()).into(),
        tex::Error::InvalidMagic(_) => Rejected::InvalidFormat(source.to_path_buf()).into(),
        tex::Error::UnsupportedFormat(kind) => Rejected::UnsupportedFormat(kind).into(),
        other => anyhow::Error::new(other).context(format!("Failed to convert {}", source.display())),
    }
}

/// Compare two paths after making them absolute.
fn same_path(a: &Path, b: &Path) -> Result<bool> {
    if let (Ok(a), Ok(b)) = (a.canonicalize(), b.canonicalize()) {
        return Ok(a == b);
    }
    Ok(full_path(a)? == full_path(b)?)
}

/// Absolute, lexically normalized form of `path`.
fn full_path(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    let mut full = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                full.pop();
            }
            other => full.push(other),
        }
    }
    Ok(full)
}
