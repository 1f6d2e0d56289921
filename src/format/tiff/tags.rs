//! TIFF field type and tag definitions.
//!
//! - Field types determine how an entry's value is encoded and how many bytes
//!   it occupies, which in turn decides inline vs offset storage.
//! - Tag IDs name the metadata an entry carries. The decoder keeps every tag,
//!   known or not; the vocabulary here only labels them.

use serde::Serialize;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// The twelve field types defined by TIFF 6.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit text, NUL-separated
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte data
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two signed 32-bit integers: numerator, denominator
    SRational = 10,

    /// IEEE 754 single precision
    Float = 11,

    /// IEEE 754 double precision
    Double = 12,
}

impl FieldType {
    /// Largest value length, in bytes, stored directly in an entry's
    /// value/offset slot.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Size of a single element of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::SByte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Create a FieldType from its numeric code.
    ///
    /// Returns `None` for codes outside 1..=12.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SShort),
            9 => Some(FieldType::SLong),
            10 => Some(FieldType::SRational),
            11 => Some(FieldType::Float),
            12 => Some(FieldType::Double),
            _ => None,
        }
    }

    /// Numeric code as stored on disk.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Upper-case TIFF name of the type.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
        }
    }

    /// Whether `count` elements of this type fit in the value/offset slot.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        value_length(self, count) <= Self::INLINE_THRESHOLD
    }
}

/// Total encoded length in bytes of `count` elements of `field_type`.
///
/// Computed in u64 so that no element count can overflow it.
#[inline]
pub fn value_length(field_type: FieldType, count: u32) -> u64 {
    field_type.size_in_bytes() as u64 * count as u64
}

// =============================================================================
// TIFF Tags
// =============================================================================

macro_rules! tiff_tags {
    ($($(#[$doc:meta])* $name:ident = $value:literal,)*) => {
        /// Well-known TIFF tag IDs.
        ///
        /// Used for labelling entries and for lookups. Entries with tags not
        /// listed here are decoded all the same.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum TiffTag {
            $($(#[$doc])* $name = $value,)*
        }

        impl TiffTag {
            /// Create a TiffTag from its numeric value.
            ///
            /// Returns `None` for tags outside the vocabulary.
            pub fn from_u16(value: u16) -> Option<Self> {
                match value {
                    $($value => Some(TiffTag::$name),)*
                    _ => None,
                }
            }

            /// Name of the tag as written in the TIFF and EXIF references.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TiffTag::$name => stringify!($name),)*
                }
            }
        }
    };
}

tiff_tags! {
    // Baseline structure
    NewSubfileType = 254,
    SubfileType = 255,
    /// Image width in pixels
    ImageWidth = 256,
    /// Image height (length) in pixels
    ImageLength = 257,
    BitsPerSample = 258,
    /// Compression scheme used for pixel data
    Compression = 259,
    PhotometricInterpretation = 262,
    Threshholding = 263,
    FillOrder = 266,
    DocumentName = 269,
    /// Free-form description string
    ImageDescription = 270,
    Make = 271,
    Model = 272,
    StripOffsets = 273,
    Orientation = 274,
    SamplesPerPixel = 277,
    RowsPerStrip = 278,
    StripByteCounts = 279,
    MinSampleValue = 280,
    MaxSampleValue = 281,
    /// Pixels per unit in X direction (RATIONAL)
    XResolution = 282,
    /// Pixels per unit in Y direction (RATIONAL)
    YResolution = 283,
    PlanarConfiguration = 284,
    PageName = 285,
    XPosition = 286,
    YPosition = 287,
    ResolutionUnit = 296,
    PageNumber = 297,
    TransferFunction = 301,
    Software = 305,
    DateTime = 306,
    Artist = 315,
    HostComputer = 316,
    Predictor = 317,
    WhitePoint = 318,
    PrimaryChromaticities = 319,
    /// Palette for PhotometricInterpretation 3
    ColorMap = 320,
    TileWidth = 322,
    TileLength = 323,
    TileOffsets = 324,
    TileByteCounts = 325,
    SubIFDs = 330,
    InkSet = 332,
    ExtraSamples = 338,
    SampleFormat = 339,
    JpegTables = 347,
    YCbCrCoefficients = 529,
    YCbCrSubSampling = 530,
    YCbCrPositioning = 531,
    ReferenceBlackWhite = 532,
    /// Adobe XMP packet (BYTE or UNDEFINED)
    Xmp = 700,
    Copyright = 33432,
    /// Pointer to the EXIF sub-directory
    ExifIfd = 34665,
    /// Embedded ICC color profile
    IccProfile = 34675,
    /// Pointer to the GPS sub-directory
    GpsIfd = 34853,
}

impl TiffTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
