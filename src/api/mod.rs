//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /cache/` - Create or replace an entry
//! - `GET /cache/` - List every entry
//! - `DELETE /cache/` - Remove every entry
//! - `GET /cache/:key` - Retrieve one entry
//! - `PUT /cache/:key` - Replace one entry's value
//! - `DELETE /cache/:key` - Remove one entry
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
