//! Storage Module
//!
//! Record layout, slot allocation, and the embedded search tree.
//!
//! ## Record Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ SizeField: u64 LE (8 bytes)                              │
//! │   = 8 + payload length                                   │
//! ├──────────────────────────────────────────────────────────┤
//! │ Node Header (8 bytes)                                    │
//! │   LeftId: u32 LE (4) | RightId: u32 LE (4)               │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload (SizeField − 8 bytes, opaque to the engine)      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A record's identifier is its byte offset on the medium, so identifiers
//! double as tree-node references. Identifier 0 is reserved: it is both
//! the location of the tree root and the "no child" sentinel inside node
//! headers (a non-root record can never live at offset 0).

pub mod codec;

pub(crate) mod allocator;
pub(crate) mod index;

pub use codec::{packed_len, RecordHeader};

// =============================================================================
// Shared Constants (used by codec, allocator, index, cache)
// =============================================================================

/// A record identifier — an offset into the storage medium
pub type RecordId = u32;

/// The fixed root location of the search tree
pub const ROOT_ID: RecordId = 0;

/// "No child" sentinel inside node headers
pub const NO_CHILD: RecordId = 0;

/// Size field width: u64 LE = 8 bytes
pub const SIZE_FIELD_LEN: usize = 8;

/// Node header width: left id (4) + right id (4) = 8 bytes
pub const NODE_HEADER_LEN: usize = 8;
