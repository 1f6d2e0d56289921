use async_trait::async_trait;
use bytes::Bytes;

use crate::error::IoError;

/// Trait for positional reads from a byte source.
///
/// The decoder never streams a source front to back: headers, directories and
/// indirect values are fetched at absolute offsets. Implementations only need
/// to answer "give me `len` bytes at `offset`", which keeps in-memory buffers
/// and local files interchangeable.
#[async_trait]
pub trait RangeReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns `RangeOutOfBounds` if the range extends past the end of the source.
    async fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Total size of the source in bytes.
    fn size(&self) -> u64;

    /// Identifier used in log output (a path, or a label for in-memory data).
    fn identifier(&self) -> &str;
}

/// Check that `len` bytes at `offset` fit in a source of `size` bytes.
pub(crate) fn check_range(offset: u64, len: usize, size: u64) -> Result<(), IoError> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= size => Ok(()),
        _ => Err(IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size,
        }),
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// Callers slice exactly the bytes they need before calling these; each helper
// panics on a short slice.

/// Read a little-endian u16 from the start of a byte slice.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from the start of a byte slice.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from the start of a byte slice.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from the start of a byte slice.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian u64 from the start of a byte slice.
///
/// Used for DOUBLE values, which are reinterpreted from their bit pattern.
#[inline]
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(raw)
}

/// Read a big-endian u64 from the start of a byte slice.
#[inline]
pub fn read_u64_be(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(raw)
}
