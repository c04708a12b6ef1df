//! Cache Statistics Module
//!
//! Counts the outcome of every operation the service performs, so clients can
//! tell creates from replaces and idempotent deletes from real ones.

use serde::Serialize;

// == Outcome ==
/// The result of a single cache operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upsert added a new canonical key
    Created,
    /// Upsert overwrote an existing canonical key
    Replaced,
    /// Single-key lookup found an entry
    Found,
    /// Single-key lookup for an absent key
    Missing,
    /// Delete removed an entry
    Deleted,
    /// Delete targeted an absent key
    DeleteMissing,
    /// The whole cache was cleared
    Cleared,
    /// A request body or key could not be decoded
    DecodeFailed,
}

// == Cache Stats ==
/// Per-outcome counters plus the live entry count.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub created: u64,
    pub replaced: u64,
    pub found: u64,
    pub missing: u64,
    pub deleted: u64,
    pub delete_missing: u64,
    pub cleared: u64,
    pub decode_failures: u64,
    /// Entries held when the snapshot was taken
    pub total_entries: usize,
}

impl CacheStats {
    /// Bumps the counter for `outcome`.
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Created => &mut self.created,
            Outcome::Replaced => &mut self.replaced,
            Outcome::Found => &mut self.found,
            Outcome::Missing => &mut self.missing,
            Outcome::Deleted => &mut self.deleted,
            Outcome::DeleteMissing => &mut self.delete_missing,
            Outcome::Cleared => &mut self.cleared,
            Outcome::DecodeFailed => &mut self.decode_failures,
        };
        *counter += 1;
    }

    /// Returns a snapshot carrying the given entry count.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }
}
