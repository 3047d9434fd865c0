//! # growdb
//!
//! A minimal embedded key-value store:
//! - Records are appended to a growable, sequentially-addressed medium
//! - The search index is an in-band binary search tree built from the
//!   records themselves (each record carries its two child identifiers)
//! - Decoded nodes are held in a bounded LRU cache with dual lookup
//!   (by identifier and by key)
//! - The storage medium, key comparator, and key extraction are pluggable
//!   strategies supplied by the embedder
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller                                │
//! │                 add / find / map / close                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Db handle                                 │
//! │      (growth pointer, populated marker, node cache)          │
//! └──────┬──────────────┬──────────────────┬────────────────────┘
//!        │              │                  │
//!        ▼              ▼                  ▼
//! ┌────────────┐ ┌─────────────┐   ┌─────────────┐
//! │ Allocator  │ │ Search Index │   │ Node Cache  │
//! │ (monotone) │ │ (in-band BST)│   │ (LRU, dual) │
//! └──────┬─────┘ └──────┬──────┘   └──────┬──────┘
//!        │              │                  │
//!        └──────────────┴────────┬─────────┘
//!                                ▼
//!                      ┌──────────────────┐
//!                      │  Medium Adapter  │
//!                      │ compare / read / │
//!                      │ write / key_of   │
//!                      └──────────────────┘
//! ```
//!
//! Storage only grows: records are never deleted, never rebalanced, and
//! never updated in place except to set a previously-absent child link.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod medium;
pub mod storage;
pub mod cache;
pub mod db;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DbError, Result};
pub use config::Config;
pub use db::Db;
pub use medium::MediumAdapter;
pub use storage::{RecordId, NO_CHILD, ROOT_ID};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of growdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
