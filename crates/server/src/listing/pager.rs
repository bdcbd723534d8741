//! Pagination windowing and lookahead.

use super::filter::ListingFilter;
use super::store::{ContentStore, RepositoryError};

/// Computes the offset/limit window for a page and probes one record past it
/// to decide whether a next page exists.
///
/// The lookahead is deliberate: one extra O(1) query instead of a count scan.
/// The two queries are not atomic with respect to concurrent writes; "has
/// more" is a best-effort signal for navigation.
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: u64,
}

impl Pager {
    /// Create a pager with a fixed page size. The size is a per-entity-kind
    /// constant and must not vary mid-session.
    pub const fn new(page_size: u64) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Fetch the window for `page_index` plus the "has more" flag.
    ///
    /// A negative page index is clamped to 0. A page beyond the end returns
    /// an empty window and `false`. A `Single` filter bypasses windowing
    /// entirely: direct lookup, never a next page.
    pub async fn page<S: ContentStore>(
        &self,
        store: &S,
        filter: &ListingFilter,
        page_index: i64,
    ) -> Result<(Vec<S::Record>, bool), RepositoryError> {
        if let ListingFilter::Single(id) = *filter {
            let records = store.get(id).await?.into_iter().collect();
            return Ok((records, false));
        }

        let page = page_index.max(0) as u64;
        let offset = page * self.page_size;

        let records = store.find(filter, offset, self.page_size).await?;
        let lookahead = store.find(filter, offset + self.page_size, 1).await?;

        Ok((records, !lookahead.is_empty()))
    }
}
