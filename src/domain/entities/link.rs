//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping between a slug and the original URL.
///
/// Both `slug` and `url` are unique across all links. The `id` is assigned by
/// the store and is never used for lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, slug: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            slug,
            url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// Creates a link candidate stamped with the current time.
    pub fn now(slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
            created_at: Utc::now(),
        }
    }

    /// Converts the candidate into a persisted link with the given id.
    pub fn into_link(self, id: i64) -> Link {
        Link::new(id, self.slug, self.url, self.created_at)
    }
}
