//! Cache Entry Module
//!
//! Defines the key-value pair held by the store.

use serde::{Deserialize, Serialize};

use crate::cache::key::{canonical_key, Scalar};

// == Cache Entry ==
/// A single cache entry: the last-written typed key and its value.
///
/// Serializes to the wire shape `{"key": K, "value": V}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The key as it was last written
    pub key: Scalar,
    /// The stored value
    pub value: Scalar,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: impl Into<Scalar>, value: impl Into<Scalar>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the canonical addressing token for this entry's key.
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.key)
    }
}
