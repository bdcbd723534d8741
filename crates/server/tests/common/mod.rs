#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities: in-memory implementations of the listing storage
//! ports, so engine behavior is exercised without a database.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use quaderno_server::listing::{
    ContentStore, FavoriteError, FavoritesSource, LearnerId, ListingFilter, RepositoryError,
};

/// An opaque record as the engine sees it: an identity plus bucket keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemRecord {
    pub id: i64,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// A category bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemCategory {
    pub id: i64,
    pub name: String,
}

/// In-memory store. Records may be inserted in any order; retrieval is
/// always descending id, like the SQL stores.
#[derive(Default)]
pub struct MemStore {
    pub records: Vec<MemRecord>,
    pub categories: Vec<MemCategory>,
    pub favorites: Mutex<Vec<(i64, i64)>>,
    fail: AtomicBool,
}

impl MemStore {
    /// Store with `n` records, ids 1..=n, no bucket keys.
    pub fn with_records(n: i64) -> Self {
        Self {
            records: (1..=n)
                .map(|id| MemRecord {
                    id,
                    author_id: None,
                    category_id: None,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, record: MemRecord) {
        self.records.push(record);
    }

    pub fn push_category(&mut self, id: i64, name: &str) {
        self.categories.push(MemCategory {
            id,
            name: name.to_string(),
        });
    }

    /// Make every subsequent query fail, simulating unavailable storage.
    pub fn fail_from_now_on(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::from(anyhow::anyhow!(
                "storage unavailable"
            )));
        }
        Ok(())
    }

    fn matching(&self, filter: &ListingFilter) -> Vec<MemRecord> {
        let mut matches: Vec<MemRecord> = self
            .records
            .iter()
            .filter(|r| match filter {
                ListingFilter::Single(id) => r.id == *id,
                ListingFilter::Author(id) => r.author_id == Some(*id),
                ListingFilter::Category(id) => r.category_id == Some(*id),
                ListingFilter::All => true,
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.id.cmp(&a.id));
        matches
    }
}

#[async_trait]
impl ContentStore for MemStore {
    type Record = MemRecord;
    type Category = MemCategory;

    async fn find(
        &self,
        filter: &ListingFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<MemRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<MemRecord>, RepositoryError> {
        self.check_available()?;
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn categories(&self) -> Result<Vec<MemCategory>, RepositoryError> {
        self.check_available()?;
        Ok(self.categories.clone())
    }
}

#[async_trait]
impl FavoritesSource for MemStore {
    async fn favorites_of(&self, learner: LearnerId) -> Result<Vec<MemRecord>, RepositoryError> {
        self.check_available()?;
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites
            .iter()
            .filter(|(l, _)| *l == learner.0)
            .filter_map(|(_, id)| self.records.iter().find(|r| r.id == *id).cloned())
            .collect())
    }

    async fn add_favorite(&self, learner: LearnerId, record_id: i64) -> Result<(), FavoriteError> {
        self.check_available()?;
        if !self.records.iter().any(|r| r.id == record_id) {
            return Err(FavoriteError::NotFound);
        }
        self.favorites.lock().unwrap().push((learner.0, record_id));
        Ok(())
    }
}

/// Ids of a record sequence, in order.
pub fn ids(records: &[MemRecord]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}
