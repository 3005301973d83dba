//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Response carrying the issued slug.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub short_url: String,
}
