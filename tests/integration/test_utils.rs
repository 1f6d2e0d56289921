//! Test utilities for integration tests.
//!
//! [`TiffBuilder`] lays out a complete metadata stream in memory: header,
//! directories in chain order, and each directory's out-of-line values
//! directly after it.

use tiff_meta::{ByteOrder, CountWidth, FieldType};

// =============================================================================
// Encoding helpers
// =============================================================================

pub fn put_u16(out: &mut Vec<u8>, value: u16, order: ByteOrder) {
    match order {
        ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
    }
}

pub fn put_u32(out: &mut Vec<u8>, value: u32, order: ByteOrder) {
    match order {
        ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
    }
}

/// Element data for a fixture entry, encoded when the stream is built.
#[derive(Debug, Clone)]
pub enum Payload {
    Raw(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Payload {
    fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Payload::Raw(bytes) => out.extend_from_slice(bytes),
            Payload::U16(values) => values.iter().for_each(|v| put_u16(&mut out, *v, order)),
            Payload::U32(values) => values.iter().for_each(|v| put_u32(&mut out, *v, order)),
            Payload::F32(values) => values
                .iter()
                .for_each(|v| put_u32(&mut out, v.to_bits(), order)),
            Payload::F64(values) => {
                for v in values {
                    let bits = v.to_bits();
                    match order {
                        ByteOrder::LittleEndian => out.extend_from_slice(&bits.to_le_bytes()),
                        ByteOrder::BigEndian => out.extend_from_slice(&bits.to_be_bytes()),
                    }
                }
            }
        }
        out
    }
}

// =============================================================================
// Directory builder
// =============================================================================

#[derive(Debug, Clone)]
struct FixtureEntry {
    tag: u16,
    code: u16,
    count: u32,
    payload: Payload,
}

/// Entries of one directory, in the order they will be written.
#[derive(Debug, Clone, Default)]
pub struct DirectoryBuilder {
    entries: Vec<FixtureEntry>,
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry with an arbitrary type code and count.
    ///
    /// The payload decides inline vs out-of-line placement, so a count that
    /// disagrees with the payload produces a deliberately malformed entry.
    pub fn raw(mut self, tag: u16, code: u16, count: u32, payload: Payload) -> Self {
        self.entries.push(FixtureEntry {
            tag,
            code,
            count,
            payload,
        });
        self
    }

    fn typed(self, tag: u16, field_type: FieldType, count: usize, payload: Payload) -> Self {
        self.raw(tag, field_type.as_u16(), count as u32, payload)
    }

    pub fn byte(self, tag: u16, values: &[u8]) -> Self {
        self.typed(tag, FieldType::Byte, values.len(), Payload::Raw(values.to_vec()))
    }

    /// ASCII entry; `text` is written as-is, terminators included.
    pub fn ascii(self, tag: u16, text: &[u8]) -> Self {
        self.typed(tag, FieldType::Ascii, text.len(), Payload::Raw(text.to_vec()))
    }

    pub fn short(self, tag: u16, values: &[u16]) -> Self {
        self.typed(tag, FieldType::Short, values.len(), Payload::U16(values.to_vec()))
    }

    pub fn long(self, tag: u16, values: &[u32]) -> Self {
        self.typed(tag, FieldType::Long, values.len(), Payload::U32(values.to_vec()))
    }

    pub fn rational(self, tag: u16, values: &[(u32, u32)]) -> Self {
        let flat = values.iter().flat_map(|&(n, d)| [n, d]).collect();
        self.typed(tag, FieldType::Rational, values.len(), Payload::U32(flat))
    }

    pub fn sbyte(self, tag: u16, values: &[i8]) -> Self {
        let raw = values.iter().map(|&v| v as u8).collect();
        self.typed(tag, FieldType::SByte, values.len(), Payload::Raw(raw))
    }

    pub fn undefined(self, tag: u16, values: &[u8]) -> Self {
        self.typed(tag, FieldType::Undefined, values.len(), Payload::Raw(values.to_vec()))
    }

    pub fn sshort(self, tag: u16, values: &[i16]) -> Self {
        let raw = values.iter().map(|&v| v as u16).collect();
        self.typed(tag, FieldType::SShort, values.len(), Payload::U16(raw))
    }

    pub fn slong(self, tag: u16, values: &[i32]) -> Self {
        let raw = values.iter().map(|&v| v as u32).collect();
        self.typed(tag, FieldType::SLong, values.len(), Payload::U32(raw))
    }

    pub fn srational(self, tag: u16, values: &[(i32, i32)]) -> Self {
        let flat = values
            .iter()
            .flat_map(|&(n, d)| [n as u32, d as u32])
            .collect();
        self.typed(tag, FieldType::SRational, values.len(), Payload::U32(flat))
    }

    pub fn float(self, tag: u16, values: &[f32]) -> Self {
        self.typed(tag, FieldType::Float, values.len(), Payload::F32(values.to_vec()))
    }

    pub fn double(self, tag: u16, values: &[f64]) -> Self {
        self.typed(tag, FieldType::Double, values.len(), Payload::F64(values.to_vec()))
    }
}

// =============================================================================
// Stream builder
// =============================================================================

/// Builds a complete metadata stream.
#[derive(Debug, Clone)]
pub struct TiffBuilder {
    byte_order: ByteOrder,
    version: u16,
    count_width: CountWidth,
    directories: Vec<DirectoryBuilder>,
    cyclic: bool,
}

impl TiffBuilder {
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            version: 42,
            count_width: CountWidth::U16,
            directories: Vec::new(),
            cyclic: false,
        }
    }

    pub fn little_endian() -> Self {
        Self::new(ByteOrder::LittleEndian)
    }

    pub fn big_endian() -> Self {
        Self::new(ByteOrder::BigEndian)
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn count_width(mut self, width: CountWidth) -> Self {
        self.count_width = width;
        self
    }

    pub fn directory(mut self, directory: DirectoryBuilder) -> Self {
        self.directories.push(directory);
        self
    }

    /// Point the last directory's next link back at the first.
    pub fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    /// Offsets each directory will be written at.
    pub fn directory_offsets(&self) -> Vec<u32> {
        let entry_size = self.count_width.entry_size() as usize;
        let mut offsets = Vec::with_capacity(self.directories.len());
        let mut pos = 8usize;

        for dir in &self.directories {
            offsets.push(pos as u32);
            let out_of_line: usize = dir
                .entries
                .iter()
                .map(|e| e.payload.encode(self.byte_order).len())
                .filter(|&len| len > 4)
                .sum();
            pos += 2 + dir.entries.len() * entry_size + 4 + out_of_line;
        }

        offsets
    }

    pub fn build(&self) -> Vec<u8> {
        let order = self.byte_order;
        let offsets = self.directory_offsets();
        let entry_size = self.count_width.entry_size() as usize;

        let mut out = Vec::new();
        out.extend_from_slice(match order {
            ByteOrder::LittleEndian => b"II",
            ByteOrder::BigEndian => b"MM",
        });
        put_u16(&mut out, self.version, order);
        put_u32(&mut out, offsets.first().copied().unwrap_or(0), order);

        for (index, dir) in self.directories.iter().enumerate() {
            assert_eq!(out.len(), offsets[index] as usize);

            let payloads: Vec<Vec<u8>> = dir.entries.iter().map(|e| e.payload.encode(order)).collect();
            let mut value_pos = out.len() + 2 + dir.entries.len() * entry_size + 4;

            put_u16(&mut out, dir.entries.len() as u16, order);
            for (entry, payload) in dir.entries.iter().zip(&payloads) {
                put_u16(&mut out, entry.tag, order);
                put_u16(&mut out, entry.code, order);
                match self.count_width {
                    CountWidth::U16 => put_u16(&mut out, entry.count as u16, order),
                    CountWidth::U32 => put_u32(&mut out, entry.count, order),
                }
                if payload.len() > 4 {
                    put_u32(&mut out, value_pos as u32, order);
                    value_pos += payload.len();
                } else {
                    let mut slot = payload.clone();
                    slot.resize(4, 0);
                    out.extend_from_slice(&slot);
                }
            }

            let next = match offsets.get(index + 1) {
                Some(&offset) => offset,
                None if self.cyclic => offsets[0],
                None => 0,
            };
            put_u32(&mut out, next, order);

            for payload in payloads.iter().filter(|p| p.len() > 4) {
                out.extend_from_slice(payload);
            }
        }

        out
    }
}
