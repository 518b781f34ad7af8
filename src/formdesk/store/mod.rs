//! # Storage Layer
//!
//! Two pieces live here:
//!
//! - [`RecordStore`]: the ordered, in-memory list of committed records for the
//!   session. It is the source of truth the table reads from.
//! - [`mirror::Mirror`]: a best-effort copy of a record list in a key-value
//!   [`backend::StorageBackend`], read once when the table opens and rewritten
//!   in full after every mutation.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: production backend, one JSON file per key
//! - [`mem_backend::MemBackend`]: in-memory backend for tests, with simulated
//!   read and write failures
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── formData.json       # JSON array of every stored record
//! └── config.json         # Configuration
//! ```
//!
//! There is no versioning. Anything that fails to decode is treated as an
//! empty list.

use crate::model::{Record, RecordKey};
use std::collections::HashSet;
use tracing::warn;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod mirror;

/// The committed records of a session, in arrival order.
///
/// Records are never edited in place: they are appended, removed, or cleared.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records at the end, preserving their order.
    ///
    /// Takes any number of records so a single submit and a bulk load share
    /// one path. A record whose key is already stored is skipped, which keeps
    /// keys unique even when a loaded list is damaged. Returns how many were
    /// added.
    pub fn append(&mut self, records: Vec<Record>) -> usize {
        let mut known: HashSet<RecordKey> = self.records.iter().map(|r| r.key.clone()).collect();
        let mut added = 0;

        for record in records {
            if !known.insert(record.key.clone()) {
                warn!(key = %record.key, "skipping record with duplicate key");
                continue;
            }
            self.records.push(record);
            added += 1;
        }

        added
    }

    /// Removes the records with the given keys, returning them in store order.
    pub fn remove(&mut self, keys: &HashSet<RecordKey>) -> Vec<Record> {
        let (removed, kept) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| keys.contains(&r.key));
        self.records = kept;
        removed
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Full snapshot of the stored records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.iter().find(|r| &r.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
