//! Listing engine orchestration.

use thiserror::Error;

use super::filter::ListingFilter;
use super::links::{PageLink, build_links};
use super::pager::Pager;
use super::store::{ContentStore, FavoriteError, FavoritesSource, LearnerId, RepositoryError};

/// A listing request as translated from query parameters by the transport
/// layer. Raw identifiers are kept alongside the page index so that link
/// construction can echo them verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRequest {
    pub single_id: Option<i64>,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    pub page: i64,
}

impl ListRequest {
    /// The governing filter for this request.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter::resolve(self.single_id, self.author_id, self.category_id)
    }
}

/// A fully assembled listing page.
///
/// `favorites` is populated only by [`ListingEngine::list_for_learner`] when
/// a learner identity is supplied; it is empty otherwise.
#[derive(Debug)]
pub struct Listing<R, C> {
    pub records: Vec<R>,
    pub categories: Vec<C>,
    pub prev: Option<PageLink>,
    pub next: Option<PageLink>,
    pub favorites: Vec<R>,
}

/// Listing assembly failure. The engine commits to a complete [`Listing`] or
/// this error; it never returns a partial result.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("listing failed")]
    Failed(#[from] RepositoryError),
}

/// Orchestrates filter resolution, pagination, the unfiltered category read,
/// link construction, and the optional favorites overlay.
///
/// Stateless per call: the only cursor is the page index the caller passes
/// on each request.
pub struct ListingEngine<S: ContentStore> {
    store: S,
    pager: Pager,
}

impl<S: ContentStore> ListingEngine<S> {
    pub fn new(store: S, page_size: u64) -> Self {
        Self {
            store,
            pager: Pager::new(page_size),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.pager.page_size()
    }

    /// Assemble one listing page.
    pub async fn list(
        &self,
        request: &ListRequest,
    ) -> Result<Listing<S::Record, S::Category>, ListingError> {
        let filter = request.filter();

        let (records, has_more) = self.pager.page(&self.store, &filter, request.page).await?;
        let categories = self.store.categories().await?;
        let (prev, next) = build_links(request, &filter, has_more);

        Ok(Listing {
            records,
            categories,
            prev,
            next,
            favorites: Vec::new(),
        })
    }
}

impl<S: FavoritesSource> ListingEngine<S> {
    /// Assemble one listing page with the favorites overlay merged in for an
    /// authenticated learner. The overlay is an independent read; it never
    /// alters which records the pager returns.
    pub async fn list_for_learner(
        &self,
        request: &ListRequest,
        learner: Option<LearnerId>,
    ) -> Result<Listing<S::Record, S::Category>, ListingError> {
        let mut listing = self.list(request).await?;
        if let Some(learner) = learner {
            listing.favorites = self.store.favorites_of(learner).await?;
        }
        Ok(listing)
    }

    /// The learner's favorites alone, in insertion order.
    pub async fn favorites(
        &self,
        learner: LearnerId,
    ) -> Result<Vec<S::Record>, RepositoryError> {
        self.store.favorites_of(learner).await
    }

    /// Append a record to the learner's favorites.
    ///
    /// Fails with [`FavoriteError::NotFound`] when the record does not
    /// exist. Duplicate appends are preserved, matching the stored
    /// insertion-ordered relation.
    pub async fn add_favorite(
        &self,
        learner: LearnerId,
        record_id: i64,
    ) -> Result<(), FavoriteError> {
        self.store.add_favorite(learner, record_id).await
    }
}
