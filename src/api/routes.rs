//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten a URL (idempotent per URL)
/// - `GET  /health`  - Store and cache health
/// - `GET  /{slug}`  - Redirect to the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{slug}", get(redirect_handler))
}
