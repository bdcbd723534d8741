#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Listing engine integration tests.
//!
//! Exercises filter precedence, pagination windows, lookahead, link
//! construction, and failure propagation through the public engine surface,
//! backed by the in-memory store.

mod common;

use common::{MemRecord, MemStore, ids};
use quaderno_server::listing::{ListRequest, ListingEngine, ListingError};

fn request(
    single: Option<i64>,
    author: Option<i64>,
    category: Option<i64>,
    page: i64,
) -> ListRequest {
    ListRequest {
        single_id: single,
        author_id: author,
        category_id: category,
        page,
    }
}

// -------------------------------------------------------------------------
// Pagination windows
// -------------------------------------------------------------------------

#[tokio::test]
async fn page_window_never_exceeds_page_size() {
    let engine = ListingEngine::new(MemStore::with_records(24), 5);
    assert_eq!(engine.page_size(), 5);

    for page in 0..8 {
        let listing = engine.list(&request(None, None, None, page)).await.unwrap();
        assert!(listing.records.len() <= 5, "page {page} overflowed");
    }
}

#[tokio::test]
async fn twenty_four_posts_paginate_into_five_pages() {
    // 24 records, page size 5: pages 0..=3 full, page 4 holds the remainder.
    let engine = ListingEngine::new(MemStore::with_records(24), 5);

    let first = engine.list(&request(None, None, None, 0)).await.unwrap();
    assert_eq!(ids(&first.records), vec![24, 23, 22, 21, 20]);
    assert!(first.prev.is_none());
    assert_eq!(first.next.map(|l| l.page), Some(1));

    let last = engine.list(&request(None, None, None, 4)).await.unwrap();
    assert_eq!(ids(&last.records), vec![4, 3, 2, 1]);
    assert_eq!(last.prev.map(|l| l.page), Some(3));
    assert!(last.next.is_none());
}

#[tokio::test]
async fn exactly_one_full_page_has_no_next_link() {
    // 9 matching records at page size 9: the lookahead finds nothing.
    let mut store = MemStore::default();
    for id in 1..=9 {
        store.push(MemRecord {
            id,
            author_id: None,
            category_id: Some(2),
        });
    }
    // A record outside the category must not influence the lookahead.
    store.push(MemRecord {
        id: 10,
        author_id: None,
        category_id: Some(7),
    });
    let engine = ListingEngine::new(store, 9);

    let listing = engine
        .list(&request(None, None, Some(2), 0))
        .await
        .unwrap();
    assert_eq!(listing.records.len(), 9);
    assert!(listing.next.is_none());
    assert!(listing.prev.is_none());
}

#[tokio::test]
async fn page_zero_of_empty_store_is_empty_not_error() {
    let engine = ListingEngine::new(MemStore::default(), 5);

    let listing = engine.list(&request(None, None, None, 0)).await.unwrap();
    assert!(listing.records.is_empty());
    assert!(listing.prev.is_none());
    assert!(listing.next.is_none());
}

#[tokio::test]
async fn negative_page_is_treated_as_first() {
    let engine = ListingEngine::new(MemStore::with_records(12), 5);

    let clamped = engine.list(&request(None, None, None, -4)).await.unwrap();
    let first = engine.list(&request(None, None, None, 0)).await.unwrap();
    assert_eq!(ids(&clamped.records), ids(&first.records));
    assert!(clamped.prev.is_none());
}

// -------------------------------------------------------------------------
// Filter precedence
// -------------------------------------------------------------------------

#[tokio::test]
async fn single_id_overrides_author_and_category() {
    let mut store = MemStore::default();
    for id in 1..=6 {
        store.push(MemRecord {
            id,
            author_id: Some(2),
            category_id: Some(3),
        });
    }
    let engine = ListingEngine::new(store, 5);

    let listing = engine
        .list(&request(Some(5), Some(2), Some(3), 0))
        .await
        .unwrap();
    assert_eq!(ids(&listing.records), vec![5]);
    assert!(listing.prev.is_none());
    assert!(listing.next.is_none());
}

#[tokio::test]
async fn author_overrides_category_but_categories_list_is_unfiltered() {
    let mut store = MemStore::default();
    store.push_category(1, "algebra");
    store.push_category(3, "geometry");
    // Author 2's records sit in category 1; category 3 would match others.
    store.push(MemRecord {
        id: 1,
        author_id: Some(2),
        category_id: Some(1),
    });
    store.push(MemRecord {
        id: 2,
        author_id: Some(9),
        category_id: Some(3),
    });
    store.push(MemRecord {
        id: 3,
        author_id: Some(2),
        category_id: Some(1),
    });
    let engine = ListingEngine::new(store, 9);

    let listing = engine
        .list(&request(None, Some(2), Some(3), 0))
        .await
        .unwrap();

    // Author governs record selection; the supplied category is ignored.
    assert_eq!(ids(&listing.records), vec![3, 1]);

    // The category menu is independent of the filter.
    assert_eq!(listing.categories.len(), 2);
}

#[tokio::test]
async fn single_filter_for_missing_record_is_empty_not_error() {
    let engine = ListingEngine::new(MemStore::with_records(5), 5);

    let listing = engine
        .list(&request(Some(7), None, None, 0))
        .await
        .unwrap();
    assert!(listing.records.is_empty());
    assert!(listing.prev.is_none());
    assert!(listing.next.is_none());
}

#[tokio::test]
async fn unknown_bucket_yields_empty_page() {
    let engine = ListingEngine::new(MemStore::with_records(5), 5);

    let listing = engine
        .list(&request(None, None, Some(42), 0))
        .await
        .unwrap();
    assert!(listing.records.is_empty());
    assert!(listing.next.is_none());
}

// -------------------------------------------------------------------------
// Links
// -------------------------------------------------------------------------

#[tokio::test]
async fn links_preserve_raw_identifiers_across_pages() {
    let mut store = MemStore::default();
    for id in 1..=12 {
        store.push(MemRecord {
            id,
            author_id: Some(2),
            category_id: Some(3),
        });
    }
    let engine = ListingEngine::new(store, 5);

    // Author governs, category rides along untouched.
    let listing = engine
        .list(&request(None, Some(2), Some(3), 1))
        .await
        .unwrap();

    let prev = listing.prev.unwrap();
    assert_eq!(prev.page, 0);
    assert_eq!(prev.author_id, Some(2));
    assert_eq!(prev.category_id, Some(3));

    let next = listing.next.unwrap();
    assert_eq!(next.page, 2);
    assert_eq!(next.author_id, Some(2));
    assert_eq!(next.category_id, Some(3));
}

#[tokio::test]
async fn following_next_link_reaches_the_next_window() {
    let engine = ListingEngine::new(MemStore::with_records(13), 5);

    let mut page = 0;
    let mut seen = Vec::new();
    loop {
        let listing = engine.list(&request(None, None, None, page)).await.unwrap();
        seen.extend(ids(&listing.records));
        match listing.next {
            Some(link) => page = link.page as i64,
            None => break,
        }
    }

    assert_eq!(seen, (1..=13).rev().collect::<Vec<i64>>());
}

// -------------------------------------------------------------------------
// Purity and failure semantics
// -------------------------------------------------------------------------

#[tokio::test]
async fn identical_requests_yield_identical_listings() {
    let mut store = MemStore::default();
    store.push_category(1, "algebra");
    for id in 1..=8 {
        store.push(MemRecord {
            id,
            author_id: Some(1 + id % 2),
            category_id: Some(1),
        });
    }
    let engine = ListingEngine::new(store, 5);
    let req = request(None, None, Some(1), 1);

    let a = engine.list(&req).await.unwrap();
    let b = engine.list(&req).await.unwrap();

    assert_eq!(ids(&a.records), ids(&b.records));
    assert_eq!(a.categories, b.categories);
    assert_eq!(a.prev, b.prev);
    assert_eq!(a.next, b.next);
}

#[tokio::test]
async fn repository_failure_surfaces_as_listing_failed() {
    let store = MemStore::with_records(10);
    store.fail_from_now_on();
    let engine = ListingEngine::new(store, 5);

    let result = engine.list(&request(None, None, None, 0)).await;
    assert!(matches!(result, Err(ListingError::Failed(_))));
}
