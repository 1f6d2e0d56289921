//! Directory (IFD) decoding and chain traversal.
//!
//! # Directory Structure
//! ```text
//! u16            entry count (N)
//! N x record     tag, field type, element count, value/offset slot
//! u32            offset of the next directory (0 = end of chain)
//! ```
//!
//! Entry records are read from a cursor the directory loop owns. Decoding an
//! indirect value seeks the stream elsewhere, so before each record the stream
//! is repositioned from that cursor rather than trusted where the previous
//! value left it.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::TiffError;
use crate::io::RangeReader;

use super::entry::{read_entry, Entry};
use super::file::DecodeOptions;
use super::stream::{CountWidth, StreamReader};
use super::tags::TiffTag;

/// Size of the entry count field at the start of a directory.
const DIRECTORY_COUNT_SIZE: u64 = 2;

// =============================================================================
// Directory
// =============================================================================

/// One decoded directory: its entries in on-disk order and the link onward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    /// Absolute offset the directory was read from
    pub offset: u32,

    /// Entries in on-disk order
    pub entries: Vec<Entry>,

    /// Offset of the next directory, 0 if this is the last one
    pub next_directory_offset: u32,
}

impl Directory {
    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Find the first entry with the given tag.
    pub fn get(&self, tag: u16) -> Option<&Entry> {
        self.entries.iter().find(|e| e.tag == tag)
    }

    /// Find the first entry with a well-known tag.
    pub fn get_tag(&self, tag: TiffTag) -> Option<&Entry> {
        self.get(tag.as_u16())
    }

    /// Whether this is the last directory in the chain.
    #[inline]
    pub const fn is_last(&self) -> bool {
        self.next_directory_offset == 0
    }
}

/// Decode the directory at the stream's current position.
///
/// All-or-nothing: the first failing entry aborts the directory.
pub async fn read_directory<R: RangeReader>(
    stream: &mut StreamReader<'_, R>,
    count_width: CountWidth,
) -> Result<Directory, TiffError> {
    let start = stream.position();
    let entry_count = stream.read_u16("directory entry count").await?;

    let entry_size = count_width.entry_size();
    let mut entry_pos = start + DIRECTORY_COUNT_SIZE;
    let mut entries = Vec::with_capacity(entry_count as usize);

    for _ in 0..entry_count {
        stream.seek(entry_pos)?;
        entries.push(read_entry(stream, count_width).await?);
        entry_pos += entry_size;
    }

    stream.seek(entry_pos)?;
    let next_directory_offset = stream.read_u32("next directory offset").await?;

    Ok(Directory {
        offset: start as u32,
        entries,
        next_directory_offset,
    })
}

/// Follow the directory chain starting at `first_offset`.
///
/// An offset of 0 yields no directories. Offsets already visited fail with
/// `DirectoryCycleDetected`; chains longer than `options.max_directories`
/// fail with `TooManyDirectories`.
pub async fn read_directory_chain<R: RangeReader>(
    stream: &mut StreamReader<'_, R>,
    first_offset: u32,
    options: &DecodeOptions,
) -> Result<Vec<Directory>, TiffError> {
    let mut directories = Vec::new();
    let mut visited = HashSet::new();
    let mut offset = first_offset;

    while offset != 0 {
        if !visited.insert(offset) {
            return Err(TiffError::DirectoryCycleDetected(offset));
        }
        if directories.len() >= options.max_directories {
            return Err(TiffError::TooManyDirectories(options.max_directories));
        }

        stream.seek(u64::from(offset))?;
        let directory = read_directory(stream, options.count_width).await?;

        debug!(
            index = directories.len(),
            offset,
            entries = directory.len(),
            next = directory.next_directory_offset,
            "decoded directory"
        );

        offset = directory.next_directory_offset;
        directories.push(directory);
    }

    Ok(directories)
}

// =============================================================================
// Tests
// =============================================================================
