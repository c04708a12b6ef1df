//! KV Cache - An in-memory key-value cache served over HTTP
//!
//! Keys and values are JSON scalars (strings, numbers, booleans). Every key is
//! addressed through a canonical URL-path form under `/cache/`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::{create_router, AppState};
pub use cache::{CacheEntry, CacheStore, Scalar};
pub use config::Config;
