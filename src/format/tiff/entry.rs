//! Directory entries and their typed values.
//!
//! An entry is a 12-field-type tagged value. Decoding one entry means:
//! 1. Read the tag, field type code and element count
//! 2. Compute the value length from type and count
//! 3. If the length exceeds the 4-byte slot, read the slot as an absolute
//!    offset and seek there; otherwise the value is right under the cursor
//! 4. Materialize exactly that many bytes into a [`Value`]
//!
//! The cursor is left wherever the value ended. Callers that scan a table of
//! entries must keep their own position (see `directory.rs`).

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::TiffError;
use crate::io::RangeReader;

use super::header::ByteOrder;
use super::stream::{CountWidth, StreamReader};
use super::tags::{value_length, FieldType, TiffTag};

/// Maximum number of elements rendered by `Display` before eliding the rest.
const DISPLAY_MAX_ELEMENTS: usize = 16;

// =============================================================================
// Value
// =============================================================================

/// Decoded payload of an entry, one variant per field type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Byte(Vec<u8>),
    /// NUL-separated fragments; a trailing NUL yields a trailing empty fragment
    Ascii(Vec<String>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational {
        numerators: Vec<u32>,
        denominators: Vec<u32>,
    },
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational {
        numerators: Vec<i32>,
        denominators: Vec<i32>,
    },
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl Value {
    /// Decode `count` elements of `field_type` from `bytes`.
    ///
    /// `bytes` must hold exactly `value_length(field_type, count)` bytes.
    pub fn decode(field_type: FieldType, bytes: &[u8], byte_order: ByteOrder) -> Self {
        let width = field_type.size_in_bytes();
        let elements = bytes.chunks_exact(width);

        match field_type {
            FieldType::Byte => Value::Byte(bytes.to_vec()),
            FieldType::SByte => Value::SByte(bytes.iter().map(|&b| b as i8).collect()),
            FieldType::Undefined => Value::Undefined(bytes.to_vec()),
            FieldType::Ascii => Value::Ascii(split_ascii(bytes)),
            FieldType::Short => Value::Short(elements.map(|c| byte_order.read_u16(c)).collect()),
            FieldType::SShort => Value::SShort(elements.map(|c| byte_order.read_i16(c)).collect()),
            FieldType::Long => Value::Long(elements.map(|c| byte_order.read_u32(c)).collect()),
            FieldType::SLong => Value::SLong(elements.map(|c| byte_order.read_i32(c)).collect()),
            FieldType::Float => Value::Float(elements.map(|c| byte_order.read_f32(c)).collect()),
            FieldType::Double => Value::Double(elements.map(|c| byte_order.read_f64(c)).collect()),
            FieldType::Rational => {
                let (numerators, denominators) = elements
                    .map(|c| (byte_order.read_u32(&c[..4]), byte_order.read_u32(&c[4..])))
                    .unzip();
                Value::Rational {
                    numerators,
                    denominators,
                }
            }
            FieldType::SRational => {
                let (numerators, denominators) = elements
                    .map(|c| (byte_order.read_i32(&c[..4]), byte_order.read_i32(&c[4..])))
                    .unzip();
                Value::SRational {
                    numerators,
                    denominators,
                }
            }
        }
    }

    /// The field type this value was decoded as.
    pub const fn field_type(&self) -> FieldType {
        match self {
            Value::Byte(_) => FieldType::Byte,
            Value::Ascii(_) => FieldType::Ascii,
            Value::Short(_) => FieldType::Short,
            Value::Long(_) => FieldType::Long,
            Value::Rational { .. } => FieldType::Rational,
            Value::SByte(_) => FieldType::SByte,
            Value::Undefined(_) => FieldType::Undefined,
            Value::SShort(_) => FieldType::SShort,
            Value::SLong(_) => FieldType::SLong,
            Value::SRational { .. } => FieldType::SRational,
            Value::Float(_) => FieldType::Float,
            Value::Double(_) => FieldType::Double,
        }
    }

    /// Integer view: every element widened to i64.
    ///
    /// Defined for BYTE, SBYTE, SHORT, SSHORT, LONG and SLONG; `None` for all
    /// other types.
    pub fn as_integers(&self) -> Option<Vec<i64>> {
        match self {
            Value::Byte(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SByte(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Value::Short(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SShort(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Value::Long(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            Value::SLong(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            _ => None,
        }
    }

    /// Real view: every element widened to f64.
    ///
    /// Defined for all numeric types. Rationals are divided here, with IEEE
    /// semantics for a zero denominator: `1/0` is `+inf`, `-1/0` is `-inf`
    /// and `0/0` is NaN. `None` for ASCII and UNDEFINED.
    pub fn as_reals(&self) -> Option<Vec<f64>> {
        match self {
            Value::Float(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            Value::Double(v) => Some(v.clone()),
            Value::Rational {
                numerators,
                denominators,
            } => Some(
                numerators
                    .iter()
                    .zip(denominators)
                    .map(|(&n, &d)| f64::from(n) / f64::from(d))
                    .collect(),
            ),
            Value::SRational {
                numerators,
                denominators,
            } => Some(
                numerators
                    .iter()
                    .zip(denominators)
                    .map(|(&n, &d)| f64::from(n) / f64::from(d))
                    .collect(),
            ),
            other => other
                .as_integers()
                .map(|ints| ints.into_iter().map(|x| x as f64).collect()),
        }
    }

    /// Text fragments of an ASCII value.
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Ascii(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes of a BYTE or UNDEFINED value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Byte(v) | Value::Undefined(v) => Some(v),
            _ => None,
        }
    }
}

/// Split single-byte text on NUL. Each byte maps to the code point of the same
/// value, so non-ASCII bytes survive as Latin-1 characters.
fn split_ascii(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    bytes
        .split(|&b| b == 0)
        .map(|fragment| fragment.iter().map(|&b| char::from(b)).collect())
        .collect()
}

fn write_list<T, F>(f: &mut fmt::Formatter<'_>, items: &[T], mut write_item: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    f.write_str("[")?;
    for (i, item) in items.iter().take(DISPLAY_MAX_ELEMENTS).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_item(f, item)?;
    }
    if items.len() > DISPLAY_MAX_ELEMENTS {
        write!(f, ", ... ({} more)", items.len() - DISPLAY_MAX_ELEMENTS)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::SByte(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::Short(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::SShort(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::Long(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::SLong(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::Float(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::Double(v) => write_list(f, v, |f, x| write!(f, "{}", x)),
            Value::Ascii(v) => write_list(f, v, |f, s| write!(f, "{:?}", s)),
            Value::Rational {
                numerators,
                denominators,
            } => {
                let pairs: Vec<_> = numerators.iter().zip(denominators).collect();
                write_list(f, &pairs, |f, (n, d)| write!(f, "{}/{}", n, d))
            }
            Value::SRational {
                numerators,
                denominators,
            } => {
                let pairs: Vec<_> = numerators.iter().zip(denominators).collect();
                write_list(f, &pairs, |f, (n, d)| write!(f, "{}/{}", n, d))
            }
            Value::Undefined(v) => {
                let shown = v.len().min(DISPLAY_MAX_ELEMENTS * 2);
                write!(f, "<{} bytes: {}", v.len(), hex::encode(&v[..shown]))?;
                if shown < v.len() {
                    f.write_str("...")?;
                }
                f.write_str(">")
            }
        }
    }
}

// =============================================================================
// Entry
// =============================================================================

/// One tagged value within a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Tag ID identifying the metadata field
    pub tag: u16,

    /// Declared field type
    pub field_type: FieldType,

    /// Declared element count
    pub count: u32,

    /// Absolute offset of the value when stored indirectly, 0 when inline
    pub value_offset: u32,

    /// Decoded payload
    pub value: Value,
}

impl Entry {
    /// Encoded length of the value in bytes.
    #[inline]
    pub fn value_length(&self) -> u64 {
        value_length(self.field_type, self.count)
    }

    /// Whether the value was stored in the entry's own value/offset slot.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.field_type.fits_inline(self.count)
    }

    /// Name of the tag if it is a well-known one.
    pub fn tag_name(&self) -> Option<&'static str> {
        TiffTag::from_u16(self.tag).map(TiffTag::name)
    }

    /// See [`Value::as_integers`].
    pub fn as_integers(&self) -> Option<Vec<i64>> {
        self.value.as_integers()
    }

    /// See [`Value::as_reals`].
    pub fn as_reals(&self) -> Option<Vec<f64>> {
        self.value.as_reals()
    }

    /// See [`Value::as_strings`].
    pub fn as_strings(&self) -> Option<&[String]> {
        self.value.as_strings()
    }

    /// First element of the integer view, for single-valued tags such as
    /// ImageWidth.
    pub fn first_integer(&self) -> Option<i64> {
        self.as_integers()?.first().copied()
    }
}

/// Decode one entry starting at the stream's current position.
///
/// # Errors
/// - `UnsupportedFieldType` for a type code outside 1..=12
/// - `SeekOutOfRange` if an indirect value offset is past the end of the stream
/// - `TruncatedValue` if the stream ends before the value does
/// - `UnexpectedEof` if the entry record itself is cut short
pub async fn read_entry<R: RangeReader>(
    stream: &mut StreamReader<'_, R>,
    count_width: CountWidth,
) -> Result<Entry, TiffError> {
    let entry_offset = stream.position();

    let tag = stream.read_u16("entry tag").await?;
    let code = stream.read_u16("entry field type").await?;
    let count = stream.read_count(count_width, "entry count").await?;

    let field_type = FieldType::from_u16(code).ok_or(TiffError::UnsupportedFieldType {
        tag,
        code,
        offset: entry_offset,
    })?;

    let len = value_length(field_type, count);
    let value_offset = if len > FieldType::INLINE_THRESHOLD {
        let offset = stream.read_u32("entry value offset").await?;
        stream.seek(u64::from(offset))?;
        offset
    } else {
        0
    };

    let available = stream.remaining();
    if len > available {
        return Err(TiffError::TruncatedValue {
            tag,
            offset: stream.position(),
            needed: len,
            available,
        });
    }

    let bytes = stream.read_bytes(len as usize).await?;
    let value = Value::decode(field_type, &bytes, stream.byte_order());

    trace!(
        tag,
        field_type = field_type.name(),
        count,
        value_offset,
        "decoded entry"
    );

    Ok(Entry {
        tag,
        field_type,
        count,
        value_offset,
        value,
    })
}

// =============================================================================
// Tests
// =============================================================================
