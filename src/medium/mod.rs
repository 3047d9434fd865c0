//! Medium Adapter
//!
//! The pluggable contract between the engine and its storage medium. The
//! engine is polymorphic over this trait and never knows whether the medium
//! is a file, a memory block, or something else entirely.
//!
//! Four operations, all supplied by the embedder:
//! - `compare` — orders a decoded record's key against a search key; its
//!   sign convention fixes the orientation of the search tree
//! - `read` / `write` — positional byte access; the engine checks the
//!   returned counts and treats any shortfall as a hard error
//! - `key_of` — pure projection from a decoded record payload to its key
//!
//! ## Payload framing
//!
//! The engine treats payloads as opaque bytes. The adapters shipped with
//! this crate ([`MemoryMedium`], [`FileMedium`]) and the CLI agree on one
//! simple framing so that `key_of` can recover the key from a payload:
//!
//! ```text
//! ┌──────────────┬──────────┬─────────────────────────┐
//! │ KeyLen: u16  │   Key    │          Value          │
//! └──────────────┴──────────┴─────────────────────────┘
//! ```

mod file;
mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use std::cmp::Ordering;

use crate::error::{DbError, Result};

// =============================================================================
// The Adapter Contract
// =============================================================================

/// Embedder-supplied storage medium and key strategy.
///
/// The engine invokes these operations but never implements them.
pub trait MediumAdapter {
    /// Order a decoded record's key against a caller-supplied key.
    ///
    /// `Less` means the record's key orders before `key`. The engine
    /// preserves the reference orientation: a `Less` node sends the walk
    /// into its *left* child, anything else into its *right* child.
    fn compare(&self, record: &[u8], key: &[u8]) -> Ordering;

    /// Read bytes at `offset` into `buf`, returning the count actually read.
    ///
    /// The engine turns any count short of `buf.len()` into
    /// [`DbError::ShortRead`](crate::DbError::ShortRead).
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Write `bytes` at `offset`, returning the count actually written.
    ///
    /// The engine turns any count short of `bytes.len()` into
    /// [`DbError::ShortWrite`](crate::DbError::ShortWrite).
    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<usize>;

    /// Project a decoded record payload onto its key bytes.
    fn key_of<'r>(&self, record: &'r [u8]) -> &'r [u8];
}

// =============================================================================
// Payload Framing Helpers
// =============================================================================

/// Frame a key and value into a single payload: `[key_len: u16 LE][key][value]`
///
/// Keys longer than the length prefix can carry are rejected as
/// [`DbError::KeyTooLong`] rather than truncated.
pub fn frame_payload(key: &[u8], value: &[u8]) -> Result<Vec<u8>> {
    if key.len() > usize::from(u16::MAX) {
        return Err(DbError::KeyTooLong {
            len: key.len(),
            max: usize::from(u16::MAX),
        });
    }

    let mut payload = Vec::with_capacity(2 + key.len() + value.len());
    payload.extend_from_slice(&(key.len() as u16).to_le_bytes());
    payload.extend_from_slice(key);
    payload.extend_from_slice(value);
    Ok(payload)
}

/// Extract the key from a framed payload.
///
/// A malformed payload (too short for its declared key length) yields the
/// longest key prefix actually present rather than panicking.
pub fn payload_key(payload: &[u8]) -> &[u8] {
    if payload.len() < 2 {
        return &[];
    }
    let key_len = usize::from(u16::from_le_bytes([payload[0], payload[1]]));
    let end = (2 + key_len).min(payload.len());
    &payload[2..end]
}

/// Extract the value from a framed payload.
pub fn payload_value(payload: &[u8]) -> &[u8] {
    if payload.len() < 2 {
        return &[];
    }
    let key_len = usize::from(u16::from_le_bytes([payload[0], payload[1]]));
    let start = (2 + key_len).min(payload.len());
    &payload[start..]
}
