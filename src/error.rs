use thiserror::Error;

/// I/O errors that can occur when reading from a byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// Source could not be opened
    #[error("Source not found: {0}")]
    NotFound(String),

    /// Underlying read or seek failure
    #[error("I/O failure: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

/// Errors that can occur when decoding a TIFF metadata stream
///
/// Every variant is fatal to the decode: there is no partial-result mode.
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the source
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The first two bytes are neither II nor MM
    #[error("Unrecognized byte order marker: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    UnrecognizedByteOrderMarker(u16),

    /// Entry declares a field type outside the twelve TIFF 6.0 types
    #[error("Unsupported field type {code} for tag {tag} in entry at offset {offset}")]
    UnsupportedFieldType { tag: u16, code: u16, offset: u64 },

    /// Fewer bytes are available than the entry's value length demands
    #[error(
        "Truncated value for tag {tag}: need {needed} bytes at offset {offset}, only {available} available"
    )]
    TruncatedValue {
        tag: u16,
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// A value or directory offset points outside the stream
    #[error("Seek out of range: position {position} is beyond stream size {size}")]
    SeekOutOfRange { position: u64, size: u64 },

    /// Header or directory structure ends before its fixed-size fields
    #[error("Unexpected end of stream reading {context}: need {needed} bytes at offset {offset}")]
    UnexpectedEof {
        context: &'static str,
        offset: u64,
        needed: usize,
    },

    /// Next-directory links revisit a directory that was already decoded
    #[error("Directory chain cycle detected at offset {0}")]
    DirectoryCycleDetected(u32),

    /// The chain is longer than the configured limit
    #[error("Directory chain exceeds the limit of {0} directories")]
    TooManyDirectories(usize),
}
