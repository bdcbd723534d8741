//! Previous/next navigation link construction.

use serde::Serialize;

use super::engine::ListRequest;
use super::filter::ListingFilter;

/// A navigation reference to an adjacent page.
///
/// Carries the caller's raw author/category identifiers verbatim rather than
/// the resolved governing filter: precedence applies per request, so a link
/// holding an author together with an incidental category re-resolves to the
/// same governing filter when followed. The caller's query is never
/// rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u64,
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Derive the optional prev/next links for a listing page.
///
/// `prev` exists iff the page index is positive; `next` iff the lookahead
/// found another record. Single-item views carry no links at all. Pure data
/// construction, no I/O.
pub fn build_links(
    request: &ListRequest,
    filter: &ListingFilter,
    has_more: bool,
) -> (Option<PageLink>, Option<PageLink>) {
    if filter.is_single() {
        return (None, None);
    }

    let page = request.page.max(0) as u64;

    let prev = (page > 0).then(|| PageLink {
        page: page - 1,
        author_id: request.author_id,
        category_id: request.category_id,
    });

    let next = has_more.then(|| PageLink {
        page: page + 1,
        author_id: request.author_id,
        category_id: request.category_id,
    });

    (prev, next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn request(author: Option<i64>, category: Option<i64>, page: i64) -> ListRequest {
        ListRequest {
            single_id: None,
            author_id: author,
            category_id: category,
            page,
        }
    }

    #[test]
    fn first_page_has_no_prev() {
        let req = request(None, None, 0);
        let (prev, next) = build_links(&req, &ListingFilter::All, true);
        assert!(prev.is_none());
        assert_eq!(next.map(|l| l.page), Some(1));
    }

    #[test]
    fn later_page_links_both_ways() {
        let req = request(None, Some(3), 4);
        let (prev, next) = build_links(&req, &ListingFilter::Category(3), true);
        assert_eq!(prev.map(|l| l.page), Some(3));
        assert_eq!(next.map(|l| l.page), Some(5));
    }

    #[test]
    fn last_page_has_no_next() {
        let req = request(None, None, 4);
        let (prev, next) = build_links(&req, &ListingFilter::All, false);
        assert_eq!(prev.map(|l| l.page), Some(3));
        assert!(next.is_none());
    }

    #[test]
    fn links_carry_raw_identifiers_verbatim() {
        // Author governs, but the incidental category value still travels.
        let req = request(Some(2), Some(3), 1);
        let (prev, next) = build_links(&req, &ListingFilter::Author(2), true);

        let prev = prev.unwrap();
        assert_eq!(prev.author_id, Some(2));
        assert_eq!(prev.category_id, Some(3));

        let next = next.unwrap();
        assert_eq!(next.author_id, Some(2));
        assert_eq!(next.category_id, Some(3));
    }

    #[test]
    fn single_item_view_has_no_links() {
        let req = ListRequest {
            single_id: Some(7),
            author_id: Some(2),
            category_id: Some(3),
            page: 5,
        };
        let (prev, next) = build_links(&req, &ListingFilter::Single(7), true);
        assert!(prev.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn negative_page_behaves_like_zero() {
        let req = request(None, None, -2);
        let (prev, next) = build_links(&req, &ListingFilter::All, true);
        assert!(prev.is_none());
        assert_eq!(next.map(|l| l.page), Some(1));
    }
}
