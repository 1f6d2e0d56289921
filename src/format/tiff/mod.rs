//! TIFF metadata decoder.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares the endianness (II = little-endian,
//!   MM = big-endian). Every multi-byte field after it, offsets included, is
//!   read in that order.
//!
//! - **Directory chain**: directories (IFDs) are linked by absolute offsets.
//!   A zero link ends the chain; a link back to a visited directory is an error.
//!
//! - **Inline vs offset values**: values of up to 4 bytes live in the entry's
//!   value/offset slot. Longer values live elsewhere and the slot holds their
//!   absolute offset.
//!
//! - **Count width**: element counts are 16-bit by default (10-byte entry
//!   records). [`CountWidth::U32`] selects the 32-bit counts and 12-byte
//!   records of TIFF 6.0.

mod directory;
mod entry;
mod file;
mod header;
mod stream;
mod tags;

pub use directory::{read_directory, read_directory_chain, Directory};
pub use entry::{read_entry, Entry, Value};
pub use file::{DecodeOptions, TiffFile, DEFAULT_MAX_DIRECTORIES};
pub use header::{is_tiff_header, ByteOrder, Header, TIFF_HEADER_SIZE, TIFF_VERSION};
pub use stream::{CountWidth, StreamReader};
pub use tags::{value_length, FieldType, TiffTag};
