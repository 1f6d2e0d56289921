//! tiff-meta - Inspect the metadata directories of TIFF files.
//!
//! This binary decodes a file and prints its directory chain.

use clap::Parser;
use std::fmt::Write as _;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_meta::{
    config::{CheckConfig, Cli, Command, DumpConfig, OutputFormat},
    FileReader, TiffError, TiffFile, TiffTag, TIFF_VERSION,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Dump(config) => run_dump(config).await,
        Command::Check(config) => run_check(config).await,
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout only carries the dump.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiff_meta=debug"
    } else {
        "tiff_meta=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn decode(
    path: &std::path::Path,
    options: &tiff_meta::DecodeOptions,
) -> Result<TiffFile, TiffError> {
    let reader = FileReader::open(path).await?;
    TiffFile::parse_with_options(&reader, options).await
}

// =============================================================================
// Dump Command
// =============================================================================

async fn run_dump(config: DumpConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let file = match decode(&config.path, &config.decode.decode_options()).await {
        Ok(file) => file,
        Err(e) => {
            error!("Failed to decode {}: {}", config.path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Decoded {} directories, {} entries",
        file.directory_count(),
        file.entry_count()
    );

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&file)),
        OutputFormat::Json => match serde_json::to_string_pretty(&file) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize output: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

/// Render a decoded file as one line per entry.
fn render_text(file: &TiffFile) -> String {
    let mut out = String::new();
    let header = &file.header;

    let _ = writeln!(out, "Byte order: {}", header.byte_order.marker());
    let _ = writeln!(out, "Version: {}", header.version);
    let _ = writeln!(out, "First directory: {}", header.first_directory_offset);

    for (index, dir) in file.directories.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Directory {} @ {} ({} entries, next {})",
            index,
            dir.offset,
            dir.len(),
            dir.next_directory_offset
        );
        for entry in dir.entries() {
            let _ = writeln!(
                out,
                "  {:>5} {:<28} {:<9} {:>6}  {}",
                entry.tag,
                entry.tag_name().unwrap_or("Unknown"),
                entry.field_type.name(),
                entry.count,
                entry.value
            );
        }
    }

    out
}

// =============================================================================
// Check Command
// =============================================================================

async fn run_check(config: CheckConfig) -> ExitCode {
    init_logging(config.verbose);

    println!("TIFF Metadata Check");
    println!("═══════════════════");
    println!();

    if let Err(e) = config.validate() {
        println!("✗ Configuration: {}", e);
        return ExitCode::FAILURE;
    }

    println!("File: {}", config.path.display());

    let file = match decode(&config.path, &config.decode.decode_options()).await {
        Ok(file) => file,
        Err(e) => {
            println!("✗ Decode failed");
            println!();
            println!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", render_check(&file));

    println!();
    println!("═══════════════════");
    println!("✓ All checks passed!");

    ExitCode::SUCCESS
}

/// Summary lines for a successfully decoded file.
fn render_check(file: &TiffFile) -> String {
    let mut out = String::new();
    let header = &file.header;

    let _ = writeln!(out, "✓ Byte order: {}", header.byte_order.marker());
    if header.version == TIFF_VERSION {
        let _ = writeln!(out, "✓ Version: {}", header.version);
    } else {
        let _ = writeln!(out, "! Version: {} (expected {})", header.version, TIFF_VERSION);
    }
    let _ = writeln!(
        out,
        "✓ Directories: {} ({} entries)",
        file.directory_count(),
        file.entry_count()
    );

    for (index, dir) in file.directories.iter().enumerate() {
        let width = dir
            .get_tag(TiffTag::ImageWidth)
            .and_then(|e| e.first_integer());
        let length = dir
            .get_tag(TiffTag::ImageLength)
            .and_then(|e| e.first_integer());

        match (width, length) {
            (Some(w), Some(h)) => {
                let _ = writeln!(out, "  [{}] {} entries, {}x{}", index, dir.len(), w, h);
            }
            _ => {
                let _ = writeln!(out, "  [{}] {} entries", index, dir.len());
            }
        }
    }

    out
}
