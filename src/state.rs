//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix used to render `short_url` in responses.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        url_service: Arc<UrlService>,
        link_repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            url_service,
            link_repository,
            cache,
            base_url: base_url.into(),
        }
    }

    /// Builds the public short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }
}
