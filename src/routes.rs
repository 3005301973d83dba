//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Issue a slug for a URL
//! - `GET  /health`  - Health check: store and cache
//! - `GET  /{slug}`  - Redirect to the original URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Request deadline, cancels in-flight backend calls
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{timeout, tracing};
use crate::state::AppState;
use axum::Router;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline applied to every request
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let router = api::routes::public_routes()
        .with_state(state)
        .layer(timeout::layer(request_timeout))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
