//! Command-line configuration for the `tiff-meta` binary.
//!
//! Every option can also be set through an environment variable with the
//! `TIFF_META_` prefix:
//!
//! - `TIFF_META_FORMAT` - Dump output format, `text` or `json` (default: text)
//! - `TIFF_META_COUNT_WIDTH` - Entry count width in bits, `16` or `32` (default: 16)
//! - `TIFF_META_MAX_DIRECTORIES` - Directory chain limit (default: 1024)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::format::tiff::{CountWidth, DecodeOptions, DEFAULT_MAX_DIRECTORIES};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Inspect the metadata directories of TIFF files.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiff-meta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decode a file and print every directory and entry
    Dump(DumpConfig),

    /// Decode a file and print a pass/fail summary
    Check(CheckConfig),
}

/// Output format for the dump command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per entry
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Entry count width as given on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidthArg {
    #[value(name = "16")]
    Bits16,
    #[value(name = "32")]
    Bits32,
}

impl From<CountWidthArg> for CountWidth {
    fn from(arg: CountWidthArg) -> Self {
        match arg {
            CountWidthArg::Bits16 => CountWidth::U16,
            CountWidthArg::Bits32 => CountWidth::U32,
        }
    }
}

/// Decoder settings shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Width of each entry's element count field, in bits.
    ///
    /// Use 32 for files written to the TIFF 6.0 layout (12-byte entries).
    #[arg(long, value_enum, default_value = "16", env = "TIFF_META_COUNT_WIDTH")]
    pub count_width: CountWidthArg,

    /// Maximum number of directories to follow before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_DIRECTORIES, env = "TIFF_META_MAX_DIRECTORIES")]
    pub max_directories: usize,
}

impl DecodeArgs {
    /// Validate the settings and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_directories == 0 {
            return Err("max_directories must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Decoder options for these settings.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            count_width: self.count_width.into(),
            max_directories: self.max_directories,
        }
    }
}

/// Configuration for the dump command.
#[derive(Args, Debug, Clone)]
pub struct DumpConfig {
    /// Path of the file to decode
    pub path: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text", env = "TIFF_META_FORMAT")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub decode: DecodeArgs,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl DumpConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_path(&self.path)?;
        self.decode.validate()
    }
}

/// Configuration for the check command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Path of the file to decode
    pub path: PathBuf,

    #[command(flatten)]
    pub decode: DecodeArgs,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_path(&self.path)?;
        self.decode.validate()
    }
}

fn validate_path(path: &std::path::Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("A file path is required".to_string());
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
