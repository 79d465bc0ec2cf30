//! FILENAME: store/src/spill.rs
//! SpillStore - the temp-directory-backed ordered store.
//!
//! Keys stay resident in a comparator-sorted in-memory index; entry
//! payloads are appended to a log file inside a scoped temporary
//! directory. Dropping the store removes the directory recursively, so
//! backing storage never outlives a run even when it ends in an error.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::StoreError;
use crate::{KeyOrder, OrderedStore, ScanItem};

const LOG_FILE_NAME: &str = "entries.log";

/// One index slot: the full key plus the payload's location in the log.
struct IndexEntry {
    key: Vec<u8>,
    offset: u64,
    value_len: u64,
}

/// Ordered store with a disk-spilled value log and a scoped backing
/// directory.
pub struct SpillStore<C: KeyOrder> {
    order: C,
    /// Scoped backing storage; removed recursively when the store is
    /// dropped or closed.
    dir: TempDir,
    log_path: PathBuf,
    log: BufWriter<File>,
    log_len: u64,
    index: Vec<IndexEntry>,
}

impl<C: KeyOrder> SpillStore<C> {
    /// Creates the backing directory and opens an empty store sorted by
    /// `order`.
    pub fn open(order: C) -> Result<Self, StoreError> {
        let dir = tempfile::Builder::new().prefix("pivot-store-").tempdir()?;
        let log_path = dir.path().join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create_new(true)
            .append(true)
            .open(&log_path)?;
        log::debug!("opened spill store at {}", dir.path().display());

        Ok(SpillStore {
            order,
            dir,
            log_path,
            log: BufWriter::new(file),
            log_len: 0,
            index: Vec::new(),
        })
    }

    /// Location of the backing directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Tears the store down, surfacing removal errors that a plain drop
    /// would swallow.
    pub fn close(mut self) -> Result<(), StoreError> {
        self.log.flush()?;
        log::debug!("removing spill store at {}", self.dir.path().display());
        self.dir.close()?;
        Ok(())
    }
}

impl<C: KeyOrder> OrderedStore for SpillStore<C> {
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let order = &self.order;
        let slot = self
            .index
            .binary_search_by(|entry| order.compare(&entry.key, key));
        let position = match slot {
            Ok(_) => return Err(StoreError::DuplicateKey),
            Err(position) => position,
        };

        let offset = self.log_len;
        self.log.write_all(value)?;
        self.log_len += value.len() as u64;

        self.index.insert(
            position,
            IndexEntry {
                key: key.to_vec(),
                offset,
                value_len: value.len() as u64,
            },
        );
        Ok(())
    }

    fn scan(&mut self) -> Result<Box<dyn Iterator<Item = ScanItem> + '_>, StoreError> {
        self.log.flush()?;
        let file = File::open(&self.log_path)?;
        Ok(Box::new(Scan {
            file,
            entries: self.index.iter(),
        }))
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

struct Scan<'a> {
    file: File,
    entries: std::slice::Iter<'a, IndexEntry>,
}

impl Iterator for Scan<'_> {
    type Item = ScanItem;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        let mut value = vec![0u8; entry.value_len as usize];
        let read = self
            .file
            .seek(SeekFrom::Start(entry.offset))
            .and_then(|_| self.file.read_exact(&mut value));
        match read {
            Ok(()) => Some(Ok((entry.key.clone(), value))),
            Err(err) => Some(Err(err.into())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
