//! Slug issuance and resolution service.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::entities::NewLink;
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::infrastructure::cache::CacheService;
use crate::utils::slug_generator::{GeneratorError, SlugGenerator};

/// Errors surfaced by [`UrlService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("slug not found: {slug}")]
    NotFound { slug: String },

    #[error("could not generate a unique slug after {attempts} attempts")]
    SlugExhausted { attempts: usize },

    #[error("slug generation failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error("link store {operation} failed: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    fn store(operation: &'static str, source: StoreError) -> Self {
        Self::Store { operation, source }
    }
}

/// Tunables consumed by [`UrlService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Length of generated slugs.
    pub slug_length: usize,
    /// Upper bound on generate-and-create iterations per shorten call.
    pub max_attempts: usize,
    /// Expiry applied to cache entries; `None` stores them without expiry.
    pub cache_ttl: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            slug_length: 10,
            max_attempts: 5,
            cache_ttl: None,
        }
    }
}

/// Service for shortening URLs and resolving slugs.
///
/// Holds only immutable configuration plus shared handles to its
/// collaborators, so one instance serves any number of concurrent requests.
pub struct UrlService {
    link_repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    slug_generator: Arc<dyn SlugGenerator>,
    config: ServiceConfig,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        slug_generator: Arc<dyn SlugGenerator>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            link_repository,
            cache,
            slug_generator,
            config,
        }
    }

    /// Returns the slug for `original_url`, creating a link if needed.
    ///
    /// Shortening the same URL twice returns the same slug and never creates
    /// a second link.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`] if the URL is empty
    /// - [`ServiceError::SlugExhausted`] if every attempt collided
    /// - [`ServiceError::Generator`] / [`ServiceError::Store`] on unexpected failures
    pub async fn shorten(&self, original_url: &str) -> Result<String, ServiceError> {
        if original_url.is_empty() {
            warn!("Attempted to shorten empty URL");
            return Err(ServiceError::InvalidInput("empty URL provided"));
        }

        match self.link_repository.get_by_url(original_url).await {
            Ok(existing) => {
                info!(
                    url = original_url,
                    slug = %existing.slug,
                    "URL already shortened, returning existing slug"
                );
                return Ok(existing.slug);
            }
            Err(StoreError::NotFound) => {}
            Err(e) => {
                error!(url = original_url, error = %e, "Failed to check existing URL");
                return Err(ServiceError::store("get_by_url", e));
            }
        }

        let slug = self.create_with_unique_slug(original_url).await?;

        info!(url = original_url, slug = %slug, "Successfully shortened URL");
        Ok(slug)
    }

    /// Returns the original URL behind `slug`.
    ///
    /// The cache is consulted first. Cache failures never fail resolution;
    /// a store hit populates the cache on a best-effort basis.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`] if the slug is empty
    /// - [`ServiceError::NotFound`] if no link has this slug
    /// - [`ServiceError::Store`] on unexpected store failures
    pub async fn resolve(&self, slug: &str) -> Result<String, ServiceError> {
        if slug.is_empty() {
            warn!("Empty slug in resolve");
            return Err(ServiceError::InvalidInput("empty slug"));
        }

        match self.cache.get_url(slug).await {
            Ok(url) => {
                debug!(slug, "Cache hit");
                return Ok(url);
            }
            Err(e) if e.is_miss() => debug!(slug, "Cache miss"),
            Err(e) => warn!(slug, error = %e, "Cache lookup failed"),
        }

        let link = match self.link_repository.get_by_slug(slug).await {
            Ok(link) => link,
            Err(StoreError::NotFound) => {
                debug!(slug, "Slug not found");
                return Err(ServiceError::NotFound {
                    slug: slug.to_string(),
                });
            }
            Err(e) => {
                error!(slug, error = %e, "Failed to fetch slug from store");
                return Err(ServiceError::store("get_by_slug", e));
            }
        };

        if let Err(e) = self
            .cache
            .set_url_if_absent(slug, &link.url, self.config.cache_ttl)
            .await
        {
            warn!(slug, error = %e, "Failed to update cache");
        }

        debug!(slug, url = %link.url, "Slug resolved from store");
        Ok(link.url)
    }

    /// Generates candidates and inserts them until one is accepted.
    ///
    /// Uniqueness is left to the store's atomic create rather than a separate
    /// existence check, so concurrent callers cannot both claim one slug.
    async fn create_with_unique_slug(&self, original_url: &str) -> Result<String, ServiceError> {
        let max_attempts = self.config.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate = self.slug_generator.generate().map_err(|e| {
                error!(attempt, url = original_url, error = %e, "Failed to generate slug");
                e
            })?;

            match self
                .link_repository
                .create(NewLink::now(candidate.as_str(), original_url))
                .await
            {
                Ok(link) => return Ok(link.slug),
                Err(StoreError::AlreadyExists) => {
                    if let Some(slug) = self.find_existing_slug(original_url).await? {
                        info!(
                            url = original_url,
                            slug = %slug,
                            "URL shortened concurrently, returning existing slug"
                        );
                        return Ok(slug);
                    }

                    warn!(slug = %candidate, attempt, "Slug already exists, retrying");
                    continue;
                }
                Err(e) => {
                    error!(
                        url = original_url,
                        slug = %candidate,
                        error = %e,
                        "Failed to create link"
                    );
                    return Err(ServiceError::store("create", e));
                }
            }
        }

        error!(
            url = original_url,
            attempts = max_attempts,
            "Could not generate a unique slug"
        );
        Err(ServiceError::SlugExhausted {
            attempts: max_attempts,
        })
    }

    /// Distinguishes a URL conflict from a slug collision after `AlreadyExists`.
    async fn find_existing_slug(&self, original_url: &str) -> Result<Option<String>, ServiceError> {
        match self.link_repository.get_by_url(original_url).await {
            Ok(link) => Ok(Some(link.slug)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => {
                error!(url = original_url, error = %e, "Failed to re-check URL after conflict");
                Err(ServiceError::store("get_by_url", e))
            }
        }
    }
}
