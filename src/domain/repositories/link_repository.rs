//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by link stores.
///
/// `NotFound` and `AlreadyExists` are expected outcomes that callers branch on.
/// The remaining variants are backend failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("link already exists")]
    AlreadyExists,

    #[error("store operation timed out")]
    Timeout,

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Repository interface for persisted links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Link, StoreError>;

    /// Finds a link by its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the URL has never been shortened.
    async fn get_by_url(&self, url: &str) -> Result<Link, StoreError>;

    /// Persists a new link.
    ///
    /// Both uniqueness checks (slug and URL) and the insert happen atomically;
    /// a concurrent duplicate never produces a partial record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if either the slug or the URL is
    /// already taken.
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;
}
