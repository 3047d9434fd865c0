//! Allocator
//!
//! Hands out identifiers for new records. An identifier is simply the
//! current growth pointer; reserving a slot advances the pointer by the
//! record's exact packed size. Space below the pointer is never reused.

use crate::error::{DbError, Result};

use super::{codec, RecordId, ROOT_ID};

/// Monotonic slot allocator
#[derive(Debug)]
pub(crate) struct Allocator {
    /// Growth pointer: offset of the next record to be reserved
    next_free: RecordId,
}

impl Allocator {
    /// Start allocating from the root of an empty medium
    pub fn new() -> Self {
        Self {
            next_free: ROOT_ID,
        }
    }

    /// Resume allocating after `populated` bytes of existing records
    pub fn resume(populated: RecordId) -> Self {
        Self {
            next_free: populated,
        }
    }

    /// Reserve space for a record with the given payload size.
    ///
    /// Returns the record's identifier and advances the growth pointer by
    /// the packed length (size field + node header + payload).
    pub fn reserve(&mut self, payload_len: usize) -> Result<RecordId> {
        let id = self.next_free;

        let next = u64::from(id) + codec::packed_len(payload_len);
        if next > u64::from(RecordId::MAX) {
            return Err(DbError::StorageFull);
        }

        self.next_free = next as RecordId;
        Ok(id)
    }

    /// Current growth pointer
    pub fn next_free(&self) -> RecordId {
        self.next_free
    }
}
