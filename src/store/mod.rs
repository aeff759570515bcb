//! Processed-state bookkeeping boundary.
//!
//! The pipeline needs exactly two operations from whatever persists raw
//! URIs: list the ones not yet processed, and mark one processed (with its
//! content hash when it produced a unique record). Everything else about
//! storage lives behind this trait.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown uri: {0}")]
    UnknownUri(String),
    #[error("backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

pub trait Store {
    /// Raw URIs awaiting processing, in stable order.
    fn unprocessed(&self) -> Result<Vec<String>, StoreError>;

    /// Marks a URI processed. `hash` is present only when the URI yielded
    /// a unique record; duplicates and rejects are marked without one.
    fn mark_processed(&mut self, uri: &str, hash: Option<&str>) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredUri {
    pub processed: bool,
    pub hash: Option<String>,
}

/// In-memory Store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, StoredUri>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn add_raw(&mut self, uri: &str) {
        self.entries
            .entry(uri.to_string())
            .or_insert_with(StoredUri::default);
    }

    pub fn extend_raw<I, S>(&mut self, uris: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for uri in uris {
            self.add_raw(uri.as_ref());
        }
    }

    pub fn entry(&self, uri: &str) -> Option<&StoredUri> {
        self.entries.get(uri)
    }

    /// Hashes already attached to processed URIs; seeds the dedup set so
    /// repeated runs stay dedup-stable.
    pub fn known_hashes(&self) -> Vec<String> {
        self.entries
            .values()
            .filter_map(|entry| entry.hash.clone())
            .collect()
    }
}

impl Store for MemoryStore {
    fn unprocessed(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.processed)
            .map(|(uri, _)| uri.clone())
            .collect())
    }

    fn mark_processed(&mut self, uri: &str, hash: Option<&str>) -> Result<(), StoreError> {
        let entry = self
            .entries
            .get_mut(uri)
            .ok_or_else(|| StoreError::UnknownUri(uri.to_string()))?;
        entry.processed = true;
        entry.hash = hash.map(str::to_string);
        Ok(())
    }
}
