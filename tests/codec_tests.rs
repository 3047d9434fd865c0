//! Tests for the record codec
//!
//! These tests verify:
//! - Bit-exact on-medium layout (size field, node header, payload)
//! - Record round-trips through write_record/read_record
//! - Header-only rewrites leave the payload untouched
//! - Short reads and malformed size fields are detected

use growdb::medium::{MediumAdapter, MemoryMedium};
use growdb::storage::codec::{read_record, write_header, write_record};
use growdb::storage::{packed_len, RecordHeader};
use growdb::DbError;

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_packed_len() {
    // size field (8) + node header (8) + payload
    assert_eq!(packed_len(0), 16);
    assert_eq!(packed_len(5), 21);
    assert_eq!(packed_len(1000), 1016);
}

#[test]
fn test_write_record_layout_is_bit_exact() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 0, b"hello").unwrap();

    let bytes = medium.as_bytes();
    assert_eq!(bytes.len() as u64, packed_len(5));

    // Size field: u64 LE = 8 + payload length
    assert_eq!(&bytes[0..8], &13u64.to_le_bytes());
    // Node header: fresh leaf, both children absent
    assert_eq!(&bytes[8..16], &[0u8; 8]);
    // Payload
    assert_eq!(&bytes[16..21], b"hello");
}

#[test]
fn test_write_record_at_nonzero_offset() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 100, b"abc").unwrap();

    let bytes = medium.as_bytes();
    assert_eq!(&bytes[100..108], &11u64.to_le_bytes());
    assert_eq!(&bytes[116..119], b"abc");
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_record_round_trip() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 0, b"some payload bytes").unwrap();

    let (header, payload) = read_record(&mut medium, 0).unwrap();
    assert_eq!(header, RecordHeader::default());
    assert_eq!(&payload[..], b"some payload bytes");
}

#[test]
fn test_empty_payload_round_trip() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 0, b"").unwrap();

    let (header, payload) = read_record(&mut medium, 0).unwrap();
    assert_eq!(header, RecordHeader::default());
    assert!(payload.is_empty());
}

#[test]
fn test_write_header_updates_links_only() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 0, b"payload").unwrap();

    let linked = RecordHeader {
        left: 21,
        right: 42,
    };
    write_header(&mut medium, 0, linked).unwrap();

    let (header, payload) = read_record(&mut medium, 0).unwrap();
    assert_eq!(header, linked);
    assert_eq!(&payload[..], b"payload");
}

#[test]
fn test_header_encode_is_le() {
    let header = RecordHeader {
        left: 0x0102_0304,
        right: 0x0a0b_0c0d,
    };
    let bytes = header.encode();
    assert_eq!(bytes, [0x04, 0x03, 0x02, 0x01, 0x0d, 0x0c, 0x0b, 0x0a]);
    assert_eq!(RecordHeader::decode(&bytes), header);
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_read_from_empty_medium_is_short_read() {
    let mut medium = MemoryMedium::new();

    let err = read_record(&mut medium, 0).unwrap_err();
    assert!(matches!(
        err,
        DbError::ShortRead {
            offset: 0,
            expected: 8,
            got: 0,
        }
    ));
}

#[test]
fn test_truncated_record_is_short_read() {
    let mut medium = MemoryMedium::new();
    write_record(&mut medium, 0, b"hello").unwrap();

    // Size field claims more bytes than the medium holds
    medium.write(0, &100u64.to_le_bytes()).unwrap();

    let err = read_record(&mut medium, 0).unwrap_err();
    assert!(matches!(err, DbError::ShortRead { .. }));
}

#[test]
fn test_undersized_size_field_is_corruption() {
    let mut medium = MemoryMedium::new();
    // A size field smaller than the node header cannot be a record
    medium.write(0, &4u64.to_le_bytes()).unwrap();

    let err = read_record(&mut medium, 0).unwrap_err();
    assert!(matches!(err, DbError::Corruption(_)));
}
