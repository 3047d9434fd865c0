//! Cache Node
//!
//! An in-memory decoded mirror of a stored record.

use bytes::Bytes;

use crate::storage::{RecordHeader, RecordId};

/// A decoded record held by the node cache.
///
/// Created on first decode of a stored record, destroyed on eviction;
/// never outlives the handle that owns the cache.
#[derive(Debug, Clone)]
pub struct CacheNode {
    /// Back-reference to the record's storage identifier
    pub id: RecordId,

    /// Decoded child links
    pub header: RecordHeader,

    /// Decoded payload bytes (cheaply cloneable view)
    pub payload: Bytes,

    /// The record's logical key, as projected by the medium adapter
    pub key: Vec<u8>,

    /// Recency tick of the last access (maintained by the cache)
    pub(super) last_used: u64,
}

impl CacheNode {
    /// Build a node for a freshly decoded record
    pub fn new(id: RecordId, header: RecordHeader, payload: Bytes, key: Vec<u8>) -> Self {
        Self {
            id,
            header,
            payload,
            key,
            last_used: 0,
        }
    }
}
