//! Search Index
//!
//! The embedded binary search tree. There is no separate index structure:
//! the tree's nodes *are* the stored records, linked through the two child
//! identifiers in each node header, rooted at [`ROOT_ID`].
//!
//! Insert and find share one walk primitive (`descend`) parameterized by
//! what happens at an absent child, so the two operations can never
//! disagree about tree shape.
//!
//! ## Orientation
//!
//! The walk preserves the reference orientation exactly: when an existing
//! node's key compares `Less` than the search key, the walk descends into
//! the node's *left* child; otherwise (equal or greater) into its *right*
//! child. This is the opposite of the conventional ascending-left BST and
//! means equal keys chain to the right of the first record linked. Embedders
//! relying on in-order traversals elsewhere should account for it; insert
//! and find here always agree with each other.
//!
//! The tree is never rebalanced.

use std::cmp::Ordering;

use bytes::Bytes;

use crate::cache::{CacheNode, NodeCache};
use crate::error::{DbError, Result};
use crate::medium::MediumAdapter;

use super::codec::{self, RecordHeader};
use super::{RecordId, NO_CHILD, ROOT_ID};

// =============================================================================
// Walk Primitive
// =============================================================================

/// Which child link a walk ended on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Outcome of a tree walk
#[derive(Debug)]
pub(crate) enum Walk {
    /// A node compared equal to the search key (only with `stop_on_match`)
    Match(RecordId),
    /// The walk reached an absent child link on `parent`
    Leaf {
        parent: RecordId,
        header: RecordHeader,
        side: Side,
    },
    /// The root itself is absent — nothing has been inserted yet
    EmptyTree,
}

/// Walk from the root toward `key`, loading each node through the cache.
///
/// With `stop_on_match` the walk tests every visited node for equality
/// first and stops on the first match in tree order; without it the walk
/// descends past equal nodes (insert semantics).
///
/// A child link that points back at the node just visited is structural
/// corruption: the walk refuses to loop and reports it.
pub(crate) fn descend<M: MediumAdapter>(
    medium: &mut M,
    cache: &mut NodeCache,
    filled: RecordId,
    key: &[u8],
    stop_on_match: bool,
) -> Result<Walk> {
    let mut id = ROOT_ID;
    let mut last: Option<RecordId> = None;

    loop {
        let Some((header, payload)) = load_node(medium, cache, filled, id)? else {
            return Ok(Walk::EmptyTree);
        };

        if last == Some(id) {
            return Err(DbError::Corruption(format!(
                "tree walk revisited record {}",
                id
            )));
        }
        last = Some(id);

        let ord = medium.compare(&payload, key);

        if stop_on_match && ord == Ordering::Equal {
            return Ok(Walk::Match(id));
        }

        // Reference orientation: a "lesser" node sends the walk left,
        // everything else (equal included) goes right.
        let side = if ord == Ordering::Less {
            Side::Left
        } else {
            Side::Right
        };
        let child = match side {
            Side::Left => header.left,
            Side::Right => header.right,
        };

        if child == NO_CHILD {
            return Ok(Walk::Leaf {
                parent: id,
                header,
                side,
            });
        }

        tracing::trace!(from = id, to = child, "descending");
        id = child;
    }
}

// =============================================================================
// Insert / Find
// =============================================================================

/// Link the already-written record `new_id` under the tree by `key`.
///
/// The parent's updated header is persisted to the medium and written
/// through to the cached copy in the same step, so the cache never
/// diverges from durable storage.
pub(crate) fn insert_key<M: MediumAdapter>(
    medium: &mut M,
    cache: &mut NodeCache,
    filled: RecordId,
    key: &[u8],
    new_id: RecordId,
) -> Result<()> {
    match descend(medium, cache, filled, key, false)? {
        // Absent root: the new record *is* the root, nothing to link.
        Walk::EmptyTree => Ok(()),

        Walk::Leaf {
            parent,
            mut header,
            side,
        } => {
            match side {
                Side::Left => header.left = new_id,
                Side::Right => header.right = new_id,
            }

            codec::write_header(medium, parent, header)?;
            cache.update_header(parent, header);

            tracing::trace!(parent, child = new_id, ?side, "linked record");
            Ok(())
        }

        Walk::Match(_) => unreachable!("descend never matches without stop_on_match"),
    }
}

/// Find the first record in tree order whose key compares equal to `key`.
pub(crate) fn find_key<M: MediumAdapter>(
    medium: &mut M,
    cache: &mut NodeCache,
    filled: RecordId,
    key: &[u8],
) -> Result<Option<RecordId>> {
    match descend(medium, cache, filled, key, true)? {
        Walk::Match(id) => Ok(Some(id)),
        Walk::Leaf { .. } | Walk::EmptyTree => Ok(None),
    }
}

// =============================================================================
// Node Loading (cache-fronted decode)
// =============================================================================

/// Load the record at `id` through the cache.
///
/// `None` when `id` lies at or beyond the populated region — this is how
/// the sentinel root is detected before anything has been inserted, and
/// how `map` reports out-of-range identifiers. Decoding never advances the
/// populated marker; reads are strictly read-only.
pub(crate) fn load_node<M: MediumAdapter>(
    medium: &mut M,
    cache: &mut NodeCache,
    filled: RecordId,
    id: RecordId,
) -> Result<Option<(RecordHeader, Bytes)>> {
    if id >= filled {
        return Ok(None);
    }

    if let Some(node) = cache.get_by_id(id) {
        return Ok(Some((node.header, node.payload.clone())));
    }

    let (header, payload) = codec::read_record(medium, id)?;
    let key = medium.key_of(&payload).to_vec();
    cache.insert(CacheNode::new(id, header, payload.clone(), key));

    Ok(Some((header, payload)))
}
