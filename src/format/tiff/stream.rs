//! Positioned, endian-aware reads over a [`RangeReader`].
//!
//! `RangeReader` is positional; decoding is naturally a cursor walk. This
//! wrapper keeps the cursor and the byte order together so the decoders can
//! read fields in sequence and seek for indirect values.

use bytes::Bytes;

use crate::error::{IoError, TiffError};
use crate::io::RangeReader;

use super::header::ByteOrder;

/// Width of an entry's element count field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountWidth {
    /// 16-bit counts, 10-byte entry records
    #[default]
    U16,
    /// 32-bit counts as in TIFF 6.0, 12-byte entry records
    U32,
}

impl CountWidth {
    /// Size of the count field in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            CountWidth::U16 => 2,
            CountWidth::U32 => 4,
        }
    }

    /// Size of one entry record: tag + type + count + value/offset slot.
    #[inline]
    pub const fn entry_size(self) -> u64 {
        2 + 2 + self.size_in_bytes() as u64 + 4
    }

    /// Largest element count representable at this width.
    #[inline]
    pub const fn max_count(self) -> u32 {
        match self {
            CountWidth::U16 => u16::MAX as u32,
            CountWidth::U32 => u32::MAX,
        }
    }
}

/// A cursor over a byte source with a fixed byte order.
pub struct StreamReader<'a, R: RangeReader> {
    reader: &'a R,
    byte_order: ByteOrder,
    position: u64,
}

impl<'a, R: RangeReader> StreamReader<'a, R> {
    /// Create a cursor at position 0.
    pub fn new(reader: &'a R, byte_order: ByteOrder) -> Self {
        Self {
            reader,
            byte_order,
            position: 0,
        }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total size of the underlying source.
    #[inline]
    pub fn size(&self) -> u64 {
        self.reader.size()
    }

    /// Bytes between the cursor and the end of the source.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.size().saturating_sub(self.position)
    }

    /// Move the cursor to an absolute position.
    ///
    /// Seeking to the end of the source is allowed; any position past it is
    /// `SeekOutOfRange`.
    pub fn seek(&mut self, position: u64) -> Result<(), TiffError> {
        let size = self.size();
        if position > size {
            return Err(TiffError::SeekOutOfRange { position, size });
        }
        self.position = position;
        Ok(())
    }

    /// Read `len` raw bytes and advance the cursor.
    pub async fn read_bytes(&mut self, len: usize) -> Result<Bytes, IoError> {
        let bytes = self.reader.read_exact_at(self.position, len).await?;
        self.position += len as u64;
        Ok(bytes)
    }

    /// Read a fixed-size structural field.
    ///
    /// Running off the end is reported as `UnexpectedEof` naming `context`.
    async fn read_field(&mut self, len: usize, context: &'static str) -> Result<Bytes, TiffError> {
        let offset = self.position;
        self.read_bytes(len).await.map_err(|e| match e {
            IoError::RangeOutOfBounds { .. } => TiffError::UnexpectedEof {
                context,
                offset,
                needed: len,
            },
            other => TiffError::Io(other),
        })
    }

    /// Read a u16 in the stream's byte order.
    pub async fn read_u16(&mut self, context: &'static str) -> Result<u16, TiffError> {
        let bytes = self.read_field(2, context).await?;
        Ok(self.byte_order.read_u16(&bytes))
    }

    /// Read a u32 in the stream's byte order.
    pub async fn read_u32(&mut self, context: &'static str) -> Result<u32, TiffError> {
        let bytes = self.read_field(4, context).await?;
        Ok(self.byte_order.read_u32(&bytes))
    }

    /// Read an element count of the given width, widened to u32.
    pub async fn read_count(
        &mut self,
        width: CountWidth,
        context: &'static str,
    ) -> Result<u32, TiffError> {
        match width {
            CountWidth::U16 => Ok(self.read_u16(context).await? as u32),
            CountWidth::U32 => self.read_u32(context).await,
        }
    }
}
