//! File-backed medium
//!
//! A single flat file behind the [`MediumAdapter`] contract, accessed with
//! positional seek + read/write. Offsets handed out by the allocator map
//! directly to file offsets.

use std::cmp::Ordering;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::Result;

use super::{payload_key, MediumAdapter};

/// File-backed storage medium
#[derive(Debug)]
pub struct FileMedium {
    file: File,
}

impl FileMedium {
    /// Create a fresh store file, truncating any existing content
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(path)?;

        Ok(Self { file })
    }

    /// Open an existing store file (created if missing)
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)?;

        Ok(Self { file })
    }

    /// Current file length — the populated region of a previously written
    /// store, suitable for [`Db::open_at`](crate::Db::open_at)
    pub fn populated_len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Force file contents to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl MediumAdapter for FileMedium {
    fn compare(&self, record: &[u8], key: &[u8]) -> Ordering {
        payload_key(record).cmp(key)
    }

    fn read(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;

        // Read until the buffer is full or the file runs out; the engine
        // decides whether a short count is fatal.
        let mut total = 0;
        while total < buf.len() {
            let n = self.file.read(&mut buf[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn key_of<'r>(&self, record: &'r [u8]) -> &'r [u8] {
        payload_key(record)
    }
}
