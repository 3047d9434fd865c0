//! Node Cache
//!
//! A bounded pool of decoded nodes so repeated tree walks avoid re-reading
//! and re-decoding from the medium. Three coherent structures:
//!
//! - an ordered map by storage identifier (cache lookups during walks)
//! - an ordered map by logical key (direct key-based cache lookups)
//! - a recency map from monotonic access tick to identifier (LRU order)
//!
//! Eviction is strict least-recently-used. Ticks are unique per access, so
//! among nodes of equal "recency" (never touched after insertion) the
//! eviction order is their insertion order.
//!
//! The cache is a pure speed-up layer: a key miss means "not resolvable
//! from cache" and is never escalated to a medium read here — callers
//! needing a durable answer go through the search index, which fills the
//! cache at every step of its walk.

mod node;

pub use node::CacheNode;

use std::collections::BTreeMap;

use crate::storage::{RecordHeader, RecordId};

/// Bounded LRU cache of decoded nodes with dual-indexed lookup
#[derive(Debug)]
pub struct NodeCache {
    /// Maximum number of nodes held; 0 disables caching
    max_nodes: usize,

    /// Monotonic access counter; each lookup or insertion takes a fresh tick
    tick: u64,

    /// Nodes by storage identifier
    by_id: BTreeMap<RecordId, CacheNode>,

    /// Record identifiers by logical key
    by_key: BTreeMap<Vec<u8>, RecordId>,

    /// Record identifiers by last-access tick, oldest first
    recency: BTreeMap<u64, RecordId>,
}

impl NodeCache {
    /// Create a cache bounded to `max_nodes` decoded nodes
    pub fn new(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            tick: 0,
            by_id: BTreeMap::new(),
            by_key: BTreeMap::new(),
            recency: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up a node by identifier, promoting it to most-recently-used.
    pub fn get_by_id(&mut self, id: RecordId) -> Option<&CacheNode> {
        if !self.by_id.contains_key(&id) {
            return None;
        }
        self.promote(id);
        self.by_id.get(&id)
    }

    /// Look up a node by key, promoting it to most-recently-used.
    ///
    /// A miss means the node is not resolvable from cache; the medium is
    /// never consulted.
    pub fn get_by_key(&mut self, key: &[u8]) -> Option<&CacheNode> {
        let id = *self.by_key.get(key)?;
        self.promote(id);
        self.by_id.get(&id)
    }

    /// Non-promoting membership test (for tests and introspection)
    pub fn contains_id(&self, id: RecordId) -> bool {
        self.by_id.contains_key(&id)
    }

    // =========================================================================
    // Insertion / Eviction
    // =========================================================================

    /// Insert a freshly decoded node as most-recently-used, evicting the
    /// least-recently-used node first if the cache is at capacity.
    ///
    /// A node already cached under the same identifier is promoted instead.
    pub fn insert(&mut self, node: CacheNode) {
        if self.max_nodes == 0 {
            return;
        }
        if self.by_id.contains_key(&node.id) {
            self.promote(node.id);
            return;
        }

        if self.by_id.len() >= self.max_nodes {
            self.evict_lru();
        }

        let mut node = node;
        node.last_used = self.next_tick();

        self.recency.insert(node.last_used, node.id);
        self.by_key.insert(node.key.clone(), node.id);
        self.by_id.insert(node.id, node);
    }

    /// Write a child-link update through to the cached copy, if present.
    ///
    /// Does not touch recency: the caller just walked through this node.
    pub fn update_header(&mut self, id: RecordId, header: RecordHeader) {
        if let Some(node) = self.by_id.get_mut(&id) {
            node.header = header;
        }
    }

    /// Drop the least-recently-used node from all three structures.
    fn evict_lru(&mut self) {
        // recency is keyed oldest-tick-first
        let Some((&tick, &id)) = self.recency.iter().next() else {
            return;
        };
        self.recency.remove(&tick);

        if let Some(node) = self.by_id.remove(&id) {
            // Duplicate keys share one by_key slot; only remove it if it
            // still points at the node being evicted.
            if self.by_key.get(&node.key) == Some(&id) {
                self.by_key.remove(&node.key);
            }
            tracing::debug!(id, "evicted least-recently-used node");
        }
    }

    // =========================================================================
    // Housekeeping
    // =========================================================================

    /// Number of nodes currently cached
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Configured capacity
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Release every cached node
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_key.clear();
        self.recency.clear();
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Move a cached node to the most-recently-used position.
    fn promote(&mut self, id: RecordId) {
        let tick = self.next_tick();
        if let Some(node) = self.by_id.get_mut(&id) {
            self.recency.remove(&node.last_used);
            node.last_used = tick;
            self.recency.insert(tick, id);
        }
    }
}
