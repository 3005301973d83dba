//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Resolution goes through the cache first and falls back to the link store;
/// see [`crate::application::services::UrlService::resolve`].
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.url_service.resolve(&slug).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]))
}
