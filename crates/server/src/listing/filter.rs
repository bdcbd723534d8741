//! Filter resolution.
//!
//! A listing request may arrive with several raw identifiers at once; exactly
//! one of them governs retrieval, by fixed precedence.

/// The single filter governing a listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFilter {
    /// One specific record. Pagination is bypassed for this variant.
    Single(i64),

    /// All records by one author (worksheets only).
    Author(i64),

    /// All records in one category.
    Category(i64),

    /// No filter; every record of the entity kind.
    All,
}

impl ListingFilter {
    /// Resolve raw optional identifiers into the governing filter.
    ///
    /// Precedence is strict and exclusive: single item > author > category >
    /// none. A supplied identifier that loses precedence is ignored here but
    /// preserved verbatim in pagination links (see `links`).
    ///
    /// No referential validation happens at this layer; an identifier for a
    /// nonexistent bucket yields an empty page downstream, not an error.
    pub fn resolve(single: Option<i64>, author: Option<i64>, category: Option<i64>) -> Self {
        match (single, author, category) {
            (Some(id), _, _) => Self::Single(id),
            (None, Some(id), _) => Self::Author(id),
            (None, None, Some(id)) => Self::Category(id),
            (None, None, None) => Self::All,
        }
    }

    /// Whether this filter selects one specific record.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_wins_over_everything() {
        let filter = ListingFilter::resolve(Some(5), Some(2), Some(3));
        assert_eq!(filter, ListingFilter::Single(5));
    }

    #[test]
    fn author_wins_over_category() {
        let filter = ListingFilter::resolve(None, Some(2), Some(3));
        assert_eq!(filter, ListingFilter::Author(2));
    }

    #[test]
    fn category_when_nothing_stronger() {
        let filter = ListingFilter::resolve(None, None, Some(3));
        assert_eq!(filter, ListingFilter::Category(3));
    }

    #[test]
    fn no_identifiers_resolves_to_all() {
        let filter = ListingFilter::resolve(None, None, None);
        assert_eq!(filter, ListingFilter::All);
    }

    #[test]
    fn is_single() {
        assert!(ListingFilter::Single(1).is_single());
        assert!(!ListingFilter::Author(1).is_single());
        assert!(!ListingFilter::Category(1).is_single());
        assert!(!ListingFilter::All.is_single());
    }
}
