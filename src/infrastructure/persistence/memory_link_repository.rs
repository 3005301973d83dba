//! In-process implementation of the link repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};

#[derive(Debug, Default)]
struct Indexes {
    by_slug: HashMap<String, Link>,
    by_url: HashMap<String, Link>,
    last_id: i64,
}

/// Link store kept entirely in memory.
///
/// Both indexes live behind one reader/writer lock: lookups share it, while
/// [`LinkRepository::create`] holds it exclusively for both uniqueness checks
/// and both inserts, so no half-inserted link is ever visible.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Indexes>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_slug.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn get_by_slug(&self, slug: &str) -> Result<Link, StoreError> {
        self.inner
            .read()
            .await
            .by_slug
            .get(slug)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_url(&self, url: &str) -> Result<Link, StoreError> {
        self.inner
            .read()
            .await
            .by_url
            .get(url)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let mut indexes = self.inner.write().await;

        if indexes.by_slug.contains_key(&new_link.slug)
            || indexes.by_url.contains_key(&new_link.url)
        {
            return Err(StoreError::AlreadyExists);
        }

        indexes.last_id += 1;
        let link = new_link.into_link(indexes.last_id);

        indexes.by_slug.insert(link.slug.clone(), link.clone());
        indexes.by_url.insert(link.url.clone(), link.clone());

        Ok(link)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .create(NewLink::now("abc123", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(link.id, 1);
        assert_eq!(repo.get_by_slug("abc123").await.unwrap(), link);
        assert_eq!(repo.get_by_url("https://example.com").await.unwrap(), link);
    }

    #[tokio::test]
    async fn test_lookup_missing() {
        let repo = MemoryLinkRepository::new();

        assert_eq!(repo.get_by_slug("nope").await, Err(StoreError::NotFound));
        assert_eq!(
            repo.get_by_url("https://nope.com").await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = MemoryLinkRepository::new();

        let first = repo
            .create(NewLink::now("one", "https://one.com"))
            .await
            .unwrap();
        let second = repo
            .create(NewLink::now("two", "https://two.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let repo = MemoryLinkRepository::new();
        repo.create(NewLink::now("same", "https://one.com"))
            .await
            .unwrap();

        let result = repo.create(NewLink::now("same", "https://two.com")).await;

        assert_eq!(result, Err(StoreError::AlreadyExists));
        assert_eq!(
            repo.get_by_url("https://two.com").await,
            Err(StoreError::NotFound)
        );
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_url_rejected() {
        let repo = MemoryLinkRepository::new();
        repo.create(NewLink::now("one", "https://same.com"))
            .await
            .unwrap();

        let result = repo.create(NewLink::now("two", "https://same.com")).await;

        assert_eq!(result, Err(StoreError::AlreadyExists));
        assert_eq!(repo.get_by_slug("two").await, Err(StoreError::NotFound));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_insert_has_single_winner() {
        let repo = Arc::new(MemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(NewLink::now(format!("slug{i}"), "https://race.com"))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(StoreError::AlreadyExists) => rejected += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(rejected, 15);
        assert_eq!(repo.len().await, 1);
    }
}
