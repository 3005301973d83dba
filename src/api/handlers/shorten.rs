//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) slug for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "slug": "aB3_x9Qz0k", "short_url": "http://localhost:8080/aB3_x9Qz0k" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON or the URL is malformed.
/// Returns 500 Internal Server Error if no slug could be issued.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request("Invalid request", json!({ "reason": rejection.body_text() }))
    })?;
    payload.validate()?;

    let slug = state.url_service.shorten(&payload.url).await?;
    let short_url = state.short_url(&slug);

    info!(url = %payload.url, slug = %slug, "URL shortened");

    Ok(Json(ShortenResponse { slug, short_url }))
}
