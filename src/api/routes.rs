//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, create_handler, delete_handler, get_handler, health_handler, list_handler,
    put_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// The collection answers on both `/cache` and `/cache/`.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = get(list_handler).post(create_handler).delete(clear_handler);

    Router::new()
        .route("/cache", collection.clone())
        .route("/cache/", collection)
        .route(
            "/cache/:key",
            get(get_handler).put(put_handler).delete(delete_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
