//! Storage ports consumed by the listing engine.
//!
//! The engine never touches SQL directly; it talks to these traits. The
//! production implementations live in `sql`, and the integration tests supply
//! in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::ListingFilter;

/// Failure in the underlying record store. Propagated unchanged to the
/// caller; the engine performs no retries.
#[derive(Debug, Error)]
#[error("repository error: {0}")]
pub struct RepositoryError(#[from] anyhow::Error);

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        Self(anyhow::Error::new(e))
    }
}

/// Failure of a favorites mutation.
#[derive(Debug, Error)]
pub enum FavoriteError {
    /// The target record does not exist.
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// An authenticated learner identity, attached per request by the transport
/// layer and passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearnerId(pub i64);

/// Read access to one entity kind's records and its category buckets.
#[async_trait]
pub trait ContentStore: Send + Sync {
    type Record: Send;
    type Category: Send;

    /// Fetch a window of records under `filter`, ordered by descending id
    /// (most recent first).
    async fn find(
        &self,
        filter: &ListingFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self::Record>, RepositoryError>;

    /// Fetch one record by id.
    async fn get(&self, id: i64) -> Result<Option<Self::Record>, RepositoryError>;

    /// The full, unfiltered category list (used by callers to render a
    /// filter menu; independent of the current filter).
    async fn categories(&self) -> Result<Vec<Self::Category>, RepositoryError>;
}

/// Read/append access to a learner's favorites, orthogonal to pagination.
#[async_trait]
pub trait FavoritesSource: ContentStore {
    /// The learner's favorited records in insertion order.
    async fn favorites_of(&self, learner: LearnerId)
    -> Result<Vec<Self::Record>, RepositoryError>;

    /// Append `record_id` to the learner's favorites if it exists, otherwise
    /// fail with [`FavoriteError::NotFound`]. Duplicate appends are not
    /// deduplicated; calling twice with the same id appends twice.
    async fn add_favorite(&self, learner: LearnerId, record_id: i64) -> Result<(), FavoriteError>;
}
