//! TIFF header parsing and byte order handling.
//!
//! # Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A), recorded but not enforced
//! Bytes 4-7: Offset to first directory (0 = no directories)
//! ```

use serde::Serialize;
use tracing::warn;

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le};

// =============================================================================
// Constants
// =============================================================================

/// Marker indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Marker indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number written by every classic TIFF encoder
pub const TIFF_VERSION: u16 = 42;

/// Size of the header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF stream.
///
/// Fixed by the first two bytes of the header and applied to every
/// multi-byte field after it, offsets included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read an i16 from a byte slice using this byte order.
    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read an i32 from a byte slice using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }

    /// Read an IEEE 754 single from a byte slice using this byte order.
    #[inline]
    pub fn read_f32(self, bytes: &[u8]) -> f32 {
        f32::from_bits(self.read_u32(bytes))
    }

    /// Read an IEEE 754 double from a byte slice using this byte order.
    #[inline]
    pub fn read_f64(self, bytes: &[u8]) -> f64 {
        f64::from_bits(self.read_u64(bytes))
    }

    /// The two-letter marker for this byte order.
    pub const fn marker(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "II",
            ByteOrder::BigEndian => "MM",
        }
    }
}

// =============================================================================
// Header
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Byte order for all multi-byte values in the stream
    pub byte_order: ByteOrder,

    /// Version field as stored (42 for well-formed files)
    pub version: u16,

    /// Offset to the first directory, 0 if the stream has none
    pub first_directory_offset: u32,
}

impl Header {
    /// Parse a header from the first bytes of a stream.
    ///
    /// # Errors
    /// - `UnexpectedEof` if fewer than 8 bytes are given
    /// - `UnrecognizedByteOrderMarker` if bytes 0-1 are not II or MM
    ///
    /// A version other than 42 is logged and otherwise ignored: it does not
    /// affect the ability to locate directories.
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::UnexpectedEof {
                context: "header",
                offset: 0,
                needed: TIFF_HEADER_SIZE,
            });
        }

        // Both markers are palindromes; reading big-endian reports others as written
        let marker = u16::from_be_bytes([bytes[0], bytes[1]]);
        let byte_order = match marker {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::UnrecognizedByteOrderMarker(marker)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != TIFF_VERSION {
            warn!(
                version,
                expected = TIFF_VERSION,
                "unexpected TIFF version, continuing"
            );
        }

        let first_directory_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(Header {
            byte_order,
            version,
            first_directory_offset,
        })
    }

    /// Whether the chain is empty (first directory offset is the sentinel).
    #[inline]
    pub const fn has_directories(&self) -> bool {
        self.first_directory_offset != 0
    }
}

/// Quick check for a TIFF byte order marker followed by version 42.
///
/// Useful for sniffing a file before committing to a full decode.
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    if bytes.len() < 4 {
        return false;
    }
    match &bytes[..4] {
        [b'I', b'I', 0x2A, 0x00] | [b'M', b'M', 0x00, 0x2A] => true,
        _ => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
