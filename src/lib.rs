//! # tiff-meta
//!
//! A decoder for the metadata directories of TIFF-style tagged files.
//!
//! A file starts with an 8-byte header declaring its byte order and the
//! offset of the first directory. Directories form a linked chain; each holds
//! entries of (tag, field type, count, value). This crate walks the chain and
//! decodes every entry's value into a typed [`Value`]. Pixel data, compression
//! and semantic interpretation of tags are out of scope.
//!
//! ## Architecture
//!
//! - [`io`] - Random-access byte sources ([`MemoryReader`], [`FileReader`])
//! - [`mod@format`] - Header, directory and entry decoding
//! - [`error`] - Error types
//! - [`config`] - CLI and configuration types for the `tiff-meta` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use tiff_meta::{FileReader, TiffFile, TiffTag};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = FileReader::open("scan.tif").await?;
//!     let file = TiffFile::parse(&reader).await?;
//!
//!     for directory in &file.directories {
//!         if let Some(width) = directory.get_tag(TiffTag::ImageWidth) {
//!             println!("width: {}", width.value);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, CountWidthArg, DecodeArgs, DumpConfig, OutputFormat};
pub use error::{IoError, TiffError};
pub use format::tiff::{
    is_tiff_header, read_directory, read_directory_chain, read_entry, value_length, ByteOrder,
    CountWidth, DecodeOptions, Directory, Entry, FieldType, Header, StreamReader, TiffFile,
    TiffTag, Value, DEFAULT_MAX_DIRECTORIES, TIFF_HEADER_SIZE, TIFF_VERSION,
};
pub use io::{FileReader, MemoryReader, RangeReader};
