//! End-to-end tests for the database handle
//!
//! These tests verify:
//! - add/find/map over the memory and file media
//! - Payload round-trips byte-for-byte
//! - map beyond the populated region reports "absent"
//! - A previously written file store reopens correctly
//! - I/O shortfalls, identifier-space exhaustion, and framing limits
//!   surface as typed errors, never as success or a panic

use std::cmp::Ordering;

use growdb::medium::{frame_payload, payload_value, FileMedium, MediumAdapter, MemoryMedium};
use growdb::{Config, Db, DbError, RecordId, Result};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn open_mem() -> Db<MemoryMedium> {
    Db::new(MemoryMedium::new())
}

fn add_kv(db: &mut Db<MemoryMedium>, key: &str, value: &str) -> RecordId {
    let payload = frame_payload(key.as_bytes(), value.as_bytes()).unwrap();
    db.add(key.as_bytes(), &payload).unwrap()
}

// =============================================================================
// Basic Operation Tests
// =============================================================================

#[test]
fn test_add_then_map_round_trips() {
    let mut db = open_mem();

    let payload = frame_payload(b"k1", b"hello").unwrap();
    let id = db.add(b"k1", &payload).unwrap();

    let mapped = db.map(id).unwrap().unwrap();
    assert_eq!(&mapped[..], payload.as_slice());

    let value = payload_value(&mapped);
    assert_eq!(value, b"hello");
    assert_eq!(value.len(), 5);
}

#[test]
fn test_add_then_find_returns_assigned_id() {
    let mut db = open_mem();

    let keys = ["banana", "apple", "cherry", "date", "elderberry"];
    let ids: Vec<RecordId> = keys.iter().map(|k| add_kv(&mut db, k, "fruit")).collect();

    for (key, id) in keys.iter().zip(&ids) {
        assert_eq!(db.find(key.as_bytes()).unwrap(), Some(*id));
    }
}

#[test]
fn test_empty_store() {
    let mut db = open_mem();

    assert_eq!(db.find(b"anything").unwrap(), None);
    assert_eq!(db.map(0).unwrap(), None);
    assert_eq!(db.filled(), 0);
    assert_eq!(db.next_free(), 0);
}

#[test]
fn test_map_beyond_populated_region_is_absent() {
    let mut db = open_mem();
    add_kv(&mut db, "k", "v");

    assert_eq!(db.map(db.filled()).unwrap(), None);
    assert_eq!(db.map(db.filled() + 1000).unwrap(), None);
    assert_eq!(db.map(RecordId::MAX).unwrap(), None);
}

#[test]
fn test_many_records() {
    let mut db = open_mem();

    let mut pairs = Vec::new();
    for i in 0..100u32 {
        // Scatter the insertion order so the tree branches both ways.
        let n = (i * 37) % 100;
        let key = format!("key-{:03}", n);
        let id = add_kv(&mut db, &key, &format!("value-{}", n));
        pairs.push((key, id, format!("value-{}", n)));
    }

    for (key, id, value) in &pairs {
        assert_eq!(db.find(key.as_bytes()).unwrap(), Some(*id));
        let payload = db.map(*id).unwrap().unwrap();
        assert_eq!(payload_value(&payload), value.as_bytes());
    }
}

#[test]
fn test_close_returns_the_medium() {
    let mut db = open_mem();
    add_kv(&mut db, "k", "v");

    let medium = db.close();
    assert!(!medium.is_empty());
}

// =============================================================================
// File Medium Tests
// =============================================================================

#[test]
fn test_file_store_add_find_map() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.db");

    let medium = FileMedium::create(&path).unwrap();
    let mut db = Db::new(medium);

    let payload = frame_payload(b"alpha", b"one").unwrap();
    let id = db.add(b"alpha", &payload).unwrap();

    assert_eq!(db.find(b"alpha").unwrap(), Some(id));
    let mapped = db.map(id).unwrap().unwrap();
    assert_eq!(payload_value(&mapped), b"one");
}

#[test]
fn test_file_store_reopens() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.db");

    let mut ids = Vec::new();
    {
        let medium = FileMedium::create(&path).unwrap();
        let mut db = Db::new(medium);
        for (key, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
            let payload = frame_payload(key.as_bytes(), value.as_bytes()).unwrap();
            ids.push(db.add(key.as_bytes(), &payload).unwrap());
        }
        let mut medium = db.close();
        medium.sync().unwrap();
    }

    let medium = FileMedium::open(&path).unwrap();
    let populated = medium.populated_len().unwrap() as RecordId;
    let mut db = Db::open_at(medium, Config::default(), populated);

    assert_eq!(db.find(b"b").unwrap(), Some(ids[1]));
    let payload = db.map(ids[2]).unwrap().unwrap();
    assert_eq!(payload_value(&payload), b"3");
    assert_eq!(db.find(b"missing").unwrap(), None);

    // Appending to a reopened store keeps working.
    let payload = frame_payload(b"d", b"4").unwrap();
    let id = db.add(b"d", &payload).unwrap();
    assert_eq!(db.find(b"d").unwrap(), Some(id));
}

// =============================================================================
// I/O Failure Tests
// =============================================================================

#[test]
fn test_reading_past_the_medium_is_short_read() {
    // A populated marker beyond what the medium holds forces a shortfall.
    let mut db = Db::open_at(MemoryMedium::new(), Config::default(), 100);

    let err = db.map(0).unwrap_err();
    assert!(matches!(err, DbError::ShortRead { .. }));
}

/// A medium that reports one byte fewer than requested on every write.
struct StingyMedium {
    inner: MemoryMedium,
}

impl MediumAdapter for StingyMedium {
    fn compare(&self, record: &[u8], key: &[u8]) -> Ordering {
        self.inner.compare(record, key)
    }

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.inner.read(offset, buf)
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<usize> {
        let written = self.inner.write(offset, bytes)?;
        Ok(written.saturating_sub(1))
    }

    fn key_of<'r>(&self, record: &'r [u8]) -> &'r [u8] {
        self.inner.key_of(record)
    }
}

#[test]
fn test_id_space_overflow_is_storage_full() {
    // Park the growth pointer just shy of the end of the identifier space;
    // no record can fit in what remains.
    let mut db = Db::open_at(MemoryMedium::new(), Config::default(), RecordId::MAX - 10);

    let payload = frame_payload(b"k", b"v").unwrap();
    let err = db.add(b"k", &payload).unwrap_err();
    assert!(matches!(err, DbError::StorageFull));

    // The failed reservation never advanced the growth pointer.
    assert_eq!(db.next_free(), RecordId::MAX - 10);
    assert_eq!(db.filled(), RecordId::MAX - 10);
}

#[test]
fn test_short_write_is_fatal() {
    let mut db = Db::new(StingyMedium {
        inner: MemoryMedium::new(),
    });

    let payload = frame_payload(b"k", b"v").unwrap();
    let err = db.add(b"k", &payload).unwrap_err();
    assert!(matches!(err, DbError::ShortWrite { .. }));

    // The failed add never became visible.
    assert_eq!(db.filled(), 0);
}

// =============================================================================
// Payload Framing Tests
// =============================================================================

#[test]
fn test_oversized_key_is_rejected_by_framing() {
    let key = vec![b'k'; usize::from(u16::MAX) + 1];
    let err = frame_payload(&key, b"v").unwrap_err();
    assert!(matches!(err, DbError::KeyTooLong { .. }));

    // The largest representable key still frames.
    let key = vec![b'k'; usize::from(u16::MAX)];
    assert!(frame_payload(&key, b"v").is_ok());
}
