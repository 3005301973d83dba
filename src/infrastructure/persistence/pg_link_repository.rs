//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// Row shape shared by every `links` query.
#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    slug: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.slug, row.url, row.created_at)
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uniqueness of `slug` and `url` is enforced by table constraints, so a
/// concurrent duplicate insert fails atomically with a unique violation.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps driver errors onto the store error kinds callers branch on.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return StoreError::AlreadyExists;
    }

    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        other => StoreError::Backend(other.to_string()),
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn get_by_slug(&self, slug: &str) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, slug, url, created_at FROM links WHERE slug = $1",
        )
        .bind(slug)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get_by_url(&self, url: &str) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, slug, url, created_at FROM links WHERE url = $1",
        )
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (slug, url, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, slug, url, created_at
            "#,
        )
        .bind(&new_link.slug)
        .bind(&new_link.url)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}
