//! Configuration for growdb
//!
//! Centralized configuration with sensible defaults.

/// Default bound on the number of cached nodes
pub const DEFAULT_MAX_CACHED_NODES: usize = 255;

/// Main configuration for a growdb handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Node Cache Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of decoded nodes held in memory.
    ///
    /// Once exceeded, the least-recently-used node is evicted. A value of 0
    /// disables caching entirely; every lookup then decodes from the medium.
    pub max_cached_nodes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cached_nodes: DEFAULT_MAX_CACHED_NODES,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum number of cached nodes (0 disables the cache)
    pub fn max_cached_nodes(mut self, count: usize) -> Self {
        self.config.max_cached_nodes = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
