//! Error types for growdb
//!
//! Provides a unified error type for all engine operations.
//!
//! "Not found" is deliberately *not* an error: `find` and `map` report an
//! absent key or out-of-range identifier as `None`. Every variant below is
//! a failure the engine refuses to continue past — no operation returns a
//! successful result after a detected I/O shortfall or tree corruption.

use thiserror::Error;

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;

/// Unified error type for growdb operations
#[derive(Debug, Error)]
pub enum DbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read at offset {offset}: expected {expected} bytes, got {got}")]
    ShortRead {
        offset: u64,
        expected: usize,
        got: usize,
    },

    #[error("short write at offset {offset}: expected {expected} bytes, got {got}")]
    ShortWrite {
        offset: u64,
        expected: usize,
        got: usize,
    },

    // -------------------------------------------------------------------------
    // Structural Errors
    // -------------------------------------------------------------------------
    #[error("storage corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Allocation Errors
    // -------------------------------------------------------------------------
    #[error("storage full: growth pointer would overflow the identifier space")]
    StorageFull,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("key too long for payload framing: {len} bytes (max {max})")]
    KeyTooLong { len: usize, max: usize },
}
