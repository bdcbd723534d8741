//! Content listing and filter resolution engine.
//!
//! Backs the blog-post and worksheet listing endpoints with:
//! - Filter precedence resolution (single item > author > category > none)
//! - Offset/limit pagination with lookahead-based "has more" detection
//! - Previous/next link construction from the caller's raw identifiers
//! - An optional learner-favorites overlay (worksheets)
//!
//! The engine is agnostic to entity shape: it consumes a [`ContentStore`]
//! port and produces a [`Listing`] per request. Nothing is cached or held
//! between calls.

mod engine;
mod filter;
mod links;
mod pager;
mod sql;
mod store;

pub use engine::{ListRequest, Listing, ListingEngine, ListingError};
pub use filter::ListingFilter;
pub use links::PageLink;
pub use pager::Pager;
pub use sql::{PgPostStore, PgWorksheetStore};
pub use store::{ContentStore, FavoriteError, FavoritesSource, LearnerId, RepositoryError};

/// Posts per listing page.
pub const POSTS_PER_PAGE: u64 = 5;

/// Worksheets per listing page.
pub const WORKSHEETS_PER_PAGE: u64 = 9;
