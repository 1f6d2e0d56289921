//! Malformed streams and the errors they produce.

use tiff_meta::{MemoryReader, TiffError, TiffFile};

use super::test_utils::{put_u16, put_u32, DirectoryBuilder, Payload, TiffBuilder};

async fn parse_err(data: Vec<u8>) -> TiffError {
    let reader = MemoryReader::new(data);
    TiffFile::parse(&reader).await.unwrap_err()
}

// =============================================================================
// Header
// =============================================================================

#[tokio::test]
async fn test_unrecognized_byte_order_marker() {
    let err = parse_err(b"IM*\0\x08\0\0\0".to_vec()).await;
    assert!(matches!(err, TiffError::UnrecognizedByteOrderMarker(0x494D)));
}

#[tokio::test]
async fn test_stream_shorter_than_header() {
    let err = parse_err(b"MM\0*".to_vec()).await;
    assert!(matches!(err, TiffError::UnexpectedEof { offset: 0, .. }));
}

#[tokio::test]
async fn test_first_offset_beyond_stream() {
    let err = parse_err(b"II*\0\x00\x01\0\0".to_vec()).await;
    assert!(matches!(
        err,
        TiffError::SeekOutOfRange {
            position: 256,
            size: 8
        }
    ));
}

// =============================================================================
// Entries
// =============================================================================

#[tokio::test]
async fn test_unsupported_field_type_code() {
    let data = TiffBuilder::little_endian()
        .directory(
            DirectoryBuilder::new()
                .short(256, &[1])
                .raw(999, 13, 1, Payload::Raw(vec![0; 4])),
        )
        .build();

    // Second record: directory at 8, count field 2 bytes, first record 10 bytes
    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::UnsupportedFieldType {
            tag: 999,
            code: 13,
            offset: 20
        }
    ));
}

#[tokio::test]
async fn test_field_type_zero_is_unsupported() {
    let data = TiffBuilder::big_endian()
        .directory(DirectoryBuilder::new().raw(256, 0, 1, Payload::Raw(vec![0; 4])))
        .build();

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::UnsupportedFieldType { code: 0, offset: 10, .. }
    ));
}

#[tokio::test]
async fn test_truncated_out_of_line_value() {
    let mut data = TiffBuilder::little_endian()
        .directory(DirectoryBuilder::new().long(273, &[1, 2, 3, 4]))
        .build();
    // Value starts right after the directory: 8 + 2 + 10 + 4
    assert_eq!(data.len(), 24 + 16);
    data.truncate(data.len() - 4);

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::TruncatedValue {
            tag: 273,
            offset: 24,
            needed: 16,
            available: 12
        }
    ));
}

#[tokio::test]
async fn test_count_larger_than_payload() {
    // Claims 100 SHORTs but only 3 are stored at the end of the stream
    let data = TiffBuilder::big_endian()
        .directory(DirectoryBuilder::new().raw(258, 3, 100, Payload::U16(vec![8, 8, 8])))
        .build();

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::TruncatedValue {
            tag: 258,
            needed: 200,
            available: 6,
            ..
        }
    ));
}

#[tokio::test]
async fn test_value_offset_beyond_stream() {
    let order = tiff_meta::ByteOrder::LittleEndian;
    let mut data = b"II*\0".to_vec();
    put_u32(&mut data, 8, order);
    put_u16(&mut data, 1, order);
    put_u16(&mut data, 273, order);
    put_u16(&mut data, 4, order);
    put_u16(&mut data, 2, order);
    put_u32(&mut data, 5000, order);
    put_u32(&mut data, 0, order);

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::SeekOutOfRange {
            position: 5000,
            size: 24
        }
    ));
}

// =============================================================================
// Directories
// =============================================================================

#[tokio::test]
async fn test_directory_cut_off_mid_entry() {
    let mut data = TiffBuilder::big_endian()
        .directory(DirectoryBuilder::new().short(256, &[1]).short(257, &[2]))
        .build();
    // Keep the count and the first record plus half of the second
    data.truncate(8 + 2 + 10 + 5);

    let err = parse_err(data).await;
    assert!(matches!(err, TiffError::UnexpectedEof { offset: 24, .. }));
}

#[tokio::test]
async fn test_missing_next_directory_offset() {
    let mut data = TiffBuilder::little_endian()
        .directory(DirectoryBuilder::new().short(256, &[1]))
        .build();
    data.truncate(data.len() - 2);

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::UnexpectedEof {
            context: "next directory offset",
            offset: 20,
            needed: 4
        }
    ));
}

#[tokio::test]
async fn test_error_in_later_directory_fails_whole_decode() {
    let data = TiffBuilder::little_endian()
        .directory(DirectoryBuilder::new().short(256, &[1]))
        .directory(DirectoryBuilder::new().raw(256, 42, 1, Payload::Raw(vec![0; 4])))
        .build();

    let err = parse_err(data).await;
    assert!(matches!(
        err,
        TiffError::UnsupportedFieldType { code: 42, .. }
    ));
}

#[test]
fn test_error_messages() {
    let err = TiffError::UnsupportedFieldType {
        tag: 256,
        code: 13,
        offset: 10,
    };
    assert!(err.to_string().contains("13"));
    assert!(TiffError::DirectoryCycleDetected(8).to_string().contains("cycle"));
}
