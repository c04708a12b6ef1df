//! Cache Store Module
//!
//! HashMap storage indexed by canonical key. The store is shared across
//! request handlers behind a single `RwLock`, so each method applies fully or
//! not at all.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{canonical_key, CacheEntry, CacheStats, Outcome, Scalar};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// In-memory key-value storage with no capacity bound or expiry.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Entries keyed by canonical key
    entries: HashMap<String, CacheEntry>,
    /// Operation outcome counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new, empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Upsert ==
    /// Inserts or replaces the entry for the key's canonical form.
    ///
    /// A key that collapses to an existing canonical key replaces that entry,
    /// including its typed key. Returns the stored entry.
    pub fn upsert(&mut self, key: Scalar, value: Scalar) -> CacheEntry {
        let canonical = canonical_key(&key);
        let entry = CacheEntry { key, value };

        let outcome = match self.entries.insert(canonical.clone(), entry.clone()) {
            Some(_) => Outcome::Replaced,
            None => Outcome::Created,
        };
        debug!(key = %canonical, ?outcome, "Upserted cache entry");

        self.stats.record(outcome);
        entry
    }

    // == Get ==
    /// Retrieves the entry stored under a canonical key.
    pub fn get(&mut self, canonical: &str) -> Result<CacheEntry> {
        match self.entries.get(canonical).cloned() {
            Some(entry) => {
                self.stats.record(Outcome::Found);
                Ok(entry)
            }
            None => {
                self.stats.record(Outcome::Missing);
                Err(CacheError::NotFound(canonical.to_string()))
            }
        }
    }

    // == Get All ==
    /// Returns every entry. Order is unspecified.
    pub fn get_all(&self) -> Vec<CacheEntry> {
        self.entries.values().cloned().collect()
    }

    // == Delete ==
    /// Removes the entry stored under a canonical key, returning it.
    pub fn delete(&mut self, canonical: &str) -> Result<CacheEntry> {
        match self.entries.remove(canonical) {
            Some(removed) => {
                self.stats.record(Outcome::Deleted);
                Ok(removed)
            }
            None => {
                self.stats.record(Outcome::DeleteMissing);
                Err(CacheError::NotFound(canonical.to_string()))
            }
        }
    }

    // == Clear ==
    /// Removes every entry. Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.record(Outcome::Cleared);
        removed
    }

    /// Counts a request that was rejected before reaching the map.
    pub fn record_decode_failure(&mut self) {
        self.stats.record(Outcome::DecodeFailed);
    }

    /// Returns true if an entry exists under the canonical key.
    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    // == Stats ==
    /// Returns a snapshot of the outcome counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
