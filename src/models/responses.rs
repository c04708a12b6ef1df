//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies. Single entries are
//! returned as [`CacheEntry`](crate::cache::CacheEntry) and statistics as
//! [`CacheStats`](crate::cache::CacheStats) directly.

use serde::Serialize;

use crate::cache::CacheEntry;

/// Response body for listing the cache (GET /cache/)
#[derive(Debug, Clone, Serialize)]
pub struct CacheListResponse {
    /// Every entry, in unspecified order
    pub cache: Vec<CacheEntry>,
}

impl CacheListResponse {
    /// Creates a new CacheListResponse
    pub fn new(cache: Vec<CacheEntry>) -> Self {
        Self { cache }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
