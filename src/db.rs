//! Database Handle
//!
//! The process-scoped handle owning all engine state: the medium adapter,
//! the slot allocator, the populated-region marker, and the node cache.
//!
//! ## Responsibilities
//! - Coordinate allocator, codec, search index, and cache per operation
//! - Keep the populated marker advancing only on successful adds
//! - Own the cache's lifetime (released by `close`, nothing to flush)
//!
//! ## Concurrency Model
//!
//! Single-threaded and synchronous: every operation completes before the
//! call returns, and every operation takes `&mut self` — the compiler
//! enforces the "one logical thread of control per handle" rule the
//! reference design merely assumed.

use bytes::Bytes;

use crate::cache::NodeCache;
use crate::config::Config;
use crate::error::Result;
use crate::medium::MediumAdapter;
use crate::storage::allocator::Allocator;
use crate::storage::{codec, index, RecordId, ROOT_ID};

/// An open growdb store
pub struct Db<M: MediumAdapter> {
    /// Embedder-supplied storage medium and key strategy
    medium: M,

    /// Hands out identifiers; the growth pointer only ever increases
    allocator: Allocator,

    /// High-water mark of storage considered populated. Identifiers at or
    /// beyond it decode as "absent". Advances only after a successful add,
    /// never during decode.
    filled: RecordId,

    /// Bounded LRU pool of decoded nodes
    cache: NodeCache,

    /// Handle configuration
    config: Config,
}

impl<M: MediumAdapter> Db<M> {
    /// Open an empty store with the default configuration
    pub fn new(medium: M) -> Self {
        Self::open(medium, Config::default())
    }

    /// Open an empty store
    pub fn open(medium: M, config: Config) -> Self {
        Self::open_at(medium, config, ROOT_ID)
    }

    /// Open a store whose medium already holds `populated` bytes of
    /// records (e.g. a previously written file).
    ///
    /// The embedder tracks the populated length across sessions; see
    /// [`FileMedium::populated_len`](crate::medium::FileMedium::populated_len).
    pub fn open_at(medium: M, config: Config, populated: RecordId) -> Self {
        Self {
            medium,
            allocator: Allocator::resume(populated),
            filled: populated,
            cache: NodeCache::new(config.max_cached_nodes),
            config,
        }
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Allocate, write, and link a new record; returns its durable
    /// identifier.
    ///
    /// The first record added becomes the tree root at identifier 0. The
    /// record is not visible to `find`/`map` until the add completes.
    pub fn add(&mut self, key: &[u8], payload: &[u8]) -> Result<RecordId> {
        let id = self.allocator.reserve(payload.len())?;
        codec::write_record(&mut self.medium, id, payload)?;

        index::insert_key(&mut self.medium, &mut self.cache, self.filled, key, id)?;

        // Written and linked: the record is now part of the populated region.
        self.filled = self.allocator.next_free();

        tracing::debug!(id, payload_len = payload.len(), "added record");
        Ok(id)
    }

    /// Find the identifier of the first record in tree order whose key
    /// compares equal to `key`, or `None`.
    pub fn find(&mut self, key: &[u8]) -> Result<Option<RecordId>> {
        index::find_key(&mut self.medium, &mut self.cache, self.filled, key)
    }

    /// Decode and return a record's payload by identifier.
    ///
    /// `None` when `id` lies at or beyond the populated region. `id` must
    /// otherwise be a value previously returned by [`add`](Self::add);
    /// offsets into the middle of a record decode garbage, exactly as in
    /// the reference design.
    pub fn map(&mut self, id: RecordId) -> Result<Option<Bytes>> {
        let node = index::load_node(&mut self.medium, &mut self.cache, self.filled, id)?;
        Ok(node.map(|(_, payload)| payload))
    }

    /// Cache-only lookup by key.
    ///
    /// `None` means "not resolvable from cache" — the medium is never
    /// consulted. Callers needing a durable answer use [`find`](Self::find),
    /// which fills the cache at every step of its walk.
    pub fn cached_by_key(&mut self, key: &[u8]) -> Option<Bytes> {
        self.cache.get_by_key(key).map(|node| node.payload.clone())
    }

    /// Release all in-memory cache resources and hand the medium back.
    ///
    /// Nothing is flushed: every write already went through the medium
    /// adapter synchronously.
    pub fn close(mut self) -> M {
        tracing::debug!(cached = self.cache.len(), "closing store");
        self.cache.clear();
        self.medium
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// End of the populated region
    pub fn filled(&self) -> RecordId {
        self.filled
    }

    /// Current growth pointer
    pub fn next_free(&self) -> RecordId {
        self.allocator.next_free()
    }

    /// Number of nodes currently cached
    pub fn cached_nodes(&self) -> usize {
        self.cache.len()
    }

    /// A record's child links `(left, right)`, or `None` beyond the
    /// populated region
    pub fn links(&mut self, id: RecordId) -> Result<Option<(RecordId, RecordId)>> {
        let node = index::load_node(&mut self.medium, &mut self.cache, self.filled, id)?;
        Ok(node.map(|(header, _)| (header.left, header.right)))
    }

    /// Shared view of the underlying medium
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// The handle's configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
