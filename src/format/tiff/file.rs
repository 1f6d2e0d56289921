//! Top-level decode: header, then the directory chain.

use serde::Serialize;
use tracing::debug;

use crate::error::TiffError;
use crate::io::RangeReader;

use super::directory::{read_directory_chain, Directory};
use super::header::{Header, TIFF_HEADER_SIZE};
use super::stream::{CountWidth, StreamReader};

/// Default cap on the number of directories in one chain.
pub const DEFAULT_MAX_DIRECTORIES: usize = 1024;

/// Options controlling how a stream is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Width of each entry's element count field
    pub count_width: CountWidth,

    /// Maximum number of directories accepted in the chain
    pub max_directories: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            count_width: CountWidth::U16,
            max_directories: DEFAULT_MAX_DIRECTORIES,
        }
    }
}

/// A fully decoded TIFF metadata stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiffFile {
    pub header: Header,

    /// Directories in chain order
    pub directories: Vec<Directory>,
}

impl TiffFile {
    /// Decode a stream with default options.
    pub async fn parse<R: RangeReader>(reader: &R) -> Result<Self, TiffError> {
        Self::parse_with_options(reader, &DecodeOptions::default()).await
    }

    /// Decode a stream.
    ///
    /// Either every directory decodes or the first error is returned.
    pub async fn parse_with_options<R: RangeReader>(
        reader: &R,
        options: &DecodeOptions,
    ) -> Result<Self, TiffError> {
        if reader.size() < TIFF_HEADER_SIZE as u64 {
            return Err(TiffError::UnexpectedEof {
                context: "header",
                offset: 0,
                needed: TIFF_HEADER_SIZE,
            });
        }

        let header_bytes = reader.read_exact_at(0, TIFF_HEADER_SIZE).await?;
        let header = Header::parse(&header_bytes)?;

        debug!(
            source = reader.identifier(),
            byte_order = header.byte_order.marker(),
            first_directory = header.first_directory_offset,
            "parsed header"
        );

        let mut stream = StreamReader::new(reader, header.byte_order);
        let directories =
            read_directory_chain(&mut stream, header.first_directory_offset, options).await?;

        Ok(TiffFile {
            header,
            directories,
        })
    }

    /// Number of directories in the chain.
    #[inline]
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Total number of entries across all directories.
    pub fn entry_count(&self) -> usize {
        self.directories.iter().map(Directory::len).sum()
    }
}
