//! Record Codec
//!
//! Packs and unpacks records to and from the medium. This module is the
//! single source of truth for the on-medium layout documented in
//! [`storage`](crate::storage); nothing else touches raw record bytes.

use bytes::Bytes;

use crate::error::{DbError, Result};
use crate::medium::MediumAdapter;

use super::{RecordId, NODE_HEADER_LEN, NO_CHILD, SIZE_FIELD_LEN};

// =============================================================================
// Node Header
// =============================================================================

/// The two child identifiers carried by every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Left child identifier, or [`NO_CHILD`]
    pub left: RecordId,
    /// Right child identifier, or [`NO_CHILD`]
    pub right: RecordId,
}

impl Default for RecordHeader {
    /// A fresh leaf: both children absent
    fn default() -> Self {
        Self {
            left: NO_CHILD,
            right: NO_CHILD,
        }
    }
}

impl RecordHeader {
    /// Pack into the 8-byte on-medium form: `[left: u32 LE][right: u32 LE]`
    pub fn encode(&self) -> [u8; NODE_HEADER_LEN] {
        let mut buf = [0u8; NODE_HEADER_LEN];
        buf[0..4].copy_from_slice(&self.left.to_le_bytes());
        buf[4..8].copy_from_slice(&self.right.to_le_bytes());
        buf
    }

    /// Unpack from the 8-byte on-medium form
    pub fn decode(bytes: &[u8; NODE_HEADER_LEN]) -> Self {
        Self {
            left: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            right: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }
}

// =============================================================================
// Packed Size
// =============================================================================

/// Total bytes a record with the given payload occupies on the medium
pub fn packed_len(payload_len: usize) -> u64 {
    (SIZE_FIELD_LEN + NODE_HEADER_LEN + payload_len) as u64
}

// =============================================================================
// Encoding
// =============================================================================

/// Write a fresh record at `id`: size field, zeroed node header, payload.
///
/// Three writes at deterministic sub-offsets within the reserved span;
/// each write's count is checked.
pub fn write_record<M: MediumAdapter>(medium: &mut M, id: RecordId, payload: &[u8]) -> Result<()> {
    let base = u64::from(id);
    let size_field = (NODE_HEADER_LEN + payload.len()) as u64;

    checked_write(medium, base, &size_field.to_le_bytes())?;
    checked_write(
        medium,
        base + SIZE_FIELD_LEN as u64,
        &RecordHeader::default().encode(),
    )?;
    checked_write(
        medium,
        base + (SIZE_FIELD_LEN + NODE_HEADER_LEN) as u64,
        payload,
    )?;

    Ok(())
}

/// Rewrite only the 8-byte node header of an existing record.
///
/// This is the one in-place update the engine ever performs: setting a
/// previously-absent child link on a parent.
pub fn write_header<M: MediumAdapter>(
    medium: &mut M,
    id: RecordId,
    header: RecordHeader,
) -> Result<()> {
    checked_write(medium, u64::from(id) + SIZE_FIELD_LEN as u64, &header.encode())
}

// =============================================================================
// Decoding
// =============================================================================

/// Read the record at `id`: size field first, then header + payload in one
/// call. Returns the decoded header and a view onto the payload bytes.
///
/// Callers are responsible for checking `id` against the populated region;
/// this function assumes a record actually starts at `id`.
pub fn read_record<M: MediumAdapter>(medium: &mut M, id: RecordId) -> Result<(RecordHeader, Bytes)> {
    let base = u64::from(id);

    let mut size_buf = [0u8; SIZE_FIELD_LEN];
    checked_read(medium, base, &mut size_buf)?;
    let size_field = u64::from_le_bytes(size_buf);

    if size_field < NODE_HEADER_LEN as u64 {
        return Err(DbError::Corruption(format!(
            "record {}: size field {} smaller than node header",
            id, size_field
        )));
    }
    let block_len = usize::try_from(size_field).map_err(|_| {
        DbError::Corruption(format!(
            "record {}: size field {} exceeds addressable memory",
            id, size_field
        ))
    })?;

    let mut block = vec![0u8; block_len];
    checked_read(medium, base + SIZE_FIELD_LEN as u64, &mut block)?;

    let mut header_bytes = [0u8; NODE_HEADER_LEN];
    header_bytes.copy_from_slice(&block[..NODE_HEADER_LEN]);
    let header = RecordHeader::decode(&header_bytes);
    let payload = Bytes::from(block).slice(NODE_HEADER_LEN..);

    Ok((header, payload))
}

// =============================================================================
// Checked I/O helpers
// =============================================================================

fn checked_write<M: MediumAdapter>(medium: &mut M, offset: u64, bytes: &[u8]) -> Result<()> {
    let written = medium.write(offset, bytes)?;
    if written != bytes.len() {
        return Err(DbError::ShortWrite {
            offset,
            expected: bytes.len(),
            got: written,
        });
    }
    Ok(())
}

fn checked_read<M: MediumAdapter>(medium: &mut M, offset: u64, buf: &mut [u8]) -> Result<()> {
    let read = medium.read(offset, buf)?;
    if read != buf.len() {
        return Err(DbError::ShortRead {
            offset,
            expected: buf.len(),
            got: read,
        });
    }
    Ok(())
}
