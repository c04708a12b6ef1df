//! API Handlers
//!
//! HTTP request handlers for the `/cache/` collection, its per-key items,
//! and the stats and health endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::{canonical_key, infer_path_key, CacheEntry, CacheStats, CacheStore};
use crate::error::Result;
use crate::models::{
    requests::parse_body, CacheListResponse, CreateRequest, HealthResponse, UpdateRequest,
};

/// Application state shared across all handlers.
///
/// Contains the cache store wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone, Default)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }
}

/// Resolves an untyped path segment to the store's canonical key.
fn path_to_canonical(raw: &str) -> String {
    canonical_key(&infer_path_key(raw))
}

/// Decodes a request body, counting the rejection in the stats.
async fn decode_body<T: DeserializeOwned>(state: &AppState, body: &[u8]) -> Result<T> {
    match parse_body(body) {
        Ok(req) => Ok(req),
        Err(err) => {
            debug!(%err, "Rejected request body");
            state.cache.write().await.record_decode_failure();
            Err(err)
        }
    }
}

/// Handler for POST /cache/
///
/// Creates or replaces an entry. Responds 201 with the stored pair and a
/// `Location` header pointing at the entry.
pub async fn create_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let req: CreateRequest = decode_body(&state, &body).await?;

    let entry = state.cache.write().await.upsert(req.key, req.value);
    let location = format!("/cache/{}", entry.canonical_key());
    info!(key = %entry.key, "Stored cache entry");

    let mut response = (StatusCode::CREATED, Json(entry)).into_response();
    // Keys with control characters can't be carried in a header; skip it then.
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    Ok(response)
}

/// Handler for GET /cache/
///
/// Lists every entry as `{"cache": [...]}`.
pub async fn list_handler(State(state): State<AppState>) -> Json<CacheListResponse> {
    let entries = state.cache.read().await.get_all();
    Json(CacheListResponse::new(entries))
}

/// Handler for DELETE /cache/
///
/// Removes every entry.
pub async fn clear_handler(State(state): State<AppState>) -> StatusCode {
    let removed = state.cache.write().await.clear();
    info!(removed, "Cleared cache");
    StatusCode::NO_CONTENT
}

/// Handler for GET /cache/:key
///
/// Responds with the bare `{"key": K, "value": V}` pair, or 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> Result<Json<CacheEntry>> {
    // Write lock: lookups are counted in the stats
    let entry = state
        .cache
        .write()
        .await
        .get(&path_to_canonical(&raw_key))?;

    Ok(Json(entry))
}

/// Handler for PUT /cache/:key
///
/// Stores the body's value under the path key. A body key is kept only when
/// it addresses the same entry as the path.
pub async fn put_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
    body: Bytes,
) -> Result<StatusCode> {
    let req: UpdateRequest = decode_body(&state, &body).await?;

    let path_key = infer_path_key(&raw_key);
    let canonical = canonical_key(&path_key);
    let key = match req.key {
        Some(body_key) if canonical_key(&body_key) == canonical => body_key,
        Some(body_key) => {
            debug!(path = %canonical, body = %body_key, "Body key differs from path, using path");
            path_key
        }
        None => path_key,
    };

    state.cache.write().await.upsert(key, req.value);
    info!(key = %canonical, "Updated cache entry");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /cache/:key
///
/// Idempotent: responds 204 whether or not the key existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(raw_key): Path<String>,
) -> StatusCode {
    let canonical = path_to_canonical(&raw_key);

    match state.cache.write().await.delete(&canonical) {
        Ok(_) => info!(key = %canonical, "Deleted cache entry"),
        Err(err) => debug!(%err, "Delete of absent key"),
    }

    StatusCode::NO_CONTENT
}

/// Handler for GET /stats
///
/// Returns the per-outcome counters and the live entry count.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.read().await.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
