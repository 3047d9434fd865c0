//! In-memory medium
//!
//! A growable byte vector behind the [`MediumAdapter`] contract. Used by
//! tests and benchmarks, and handy for embedders that keep a store inside
//! a memory block.

use std::cmp::Ordering;

use crate::error::Result;

use super::{payload_key, MediumAdapter};

/// Memory-backed storage medium
#[derive(Debug, Default)]
pub struct MemoryMedium {
    data: Vec<u8>,
}

impl MemoryMedium {
    /// Create an empty medium
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes ever written (the medium only grows)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw view of the medium contents (for layout inspection in tests)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl MediumAdapter for MemoryMedium {
    fn compare(&self, record: &[u8], key: &[u8]) -> Ordering {
        payload_key(record).cmp(key)
    }

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let offset = offset as usize;
        let available = self.data.len().saturating_sub(offset);
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.data[offset..offset + n]);
        Ok(n)
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<usize> {
        let offset = offset as usize;
        let end = offset + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[offset..end].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    fn key_of<'r>(&self, record: &'r [u8]) -> &'r [u8] {
        payload_key(record)
    }
}
