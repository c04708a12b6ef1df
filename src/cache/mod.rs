//! Cache Module
//!
//! Provides the scalar key codec and the in-memory key-value store.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{
    canonical_key, decode_path_key, encode_path_key, infer_path_key, Scalar, ScalarKind,
    FLOAT_PATH_PRECISION,
};
pub use stats::{CacheStats, Outcome};
pub use store::CacheStore;
