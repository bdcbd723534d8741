//! PostgreSQL implementations of the listing storage ports.
//!
//! Window queries are generated with SeaQuery and executed through sqlx.
//! Ordering is always descending id (most recent first); the lookahead probe
//! is just another window with `limit = 1`.

use async_trait::async_trait;
use sea_query::{Alias, Asterisk, Expr, ExprTrait, Order, PostgresQueryBuilder, Query};
use sqlx::PgPool;

use crate::models::{Post, PostCategory, Worksheet, WorksheetCategory};

use super::filter::ListingFilter;
use super::store::{ContentStore, FavoriteError, FavoritesSource, LearnerId, RepositoryError};

/// Build the window SELECT for one entity table.
///
/// `has_author` marks tables carrying an author dimension. An author filter
/// against a table without one restricts the result to nothing rather than
/// silently widening it.
fn window_sql(
    table: &str,
    filter: &ListingFilter,
    has_author: bool,
    offset: u64,
    limit: u64,
) -> String {
    let mut query = Query::select();
    query.column(Asterisk).from(Alias::new(table));

    match filter {
        ListingFilter::Single(id) => {
            query.and_where(Expr::col(Alias::new("id")).eq(*id));
        }
        ListingFilter::Author(id) => {
            if has_author {
                query.and_where(Expr::col(Alias::new("author_id")).eq(*id));
            } else {
                query.and_where(Expr::cust("FALSE"));
            }
        }
        ListingFilter::Category(id) => {
            query.and_where(Expr::col(Alias::new("category_id")).eq(*id));
        }
        ListingFilter::All => {}
    }

    query.order_by(Alias::new("id"), Order::Desc);
    query.limit(limit);
    query.offset(offset);

    query.to_string(PostgresQueryBuilder)
}

/// Post records backed by the `posts` table.
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgPostStore {
    type Record = Post;
    type Category = PostCategory;

    async fn find(
        &self,
        filter: &ListingFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepositoryError> {
        let sql = window_sql("posts", filter, false, offset, limit);
        let records = sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?;
        Ok(records)
    }

    async fn get(&self, id: i64) -> Result<Option<Post>, RepositoryError> {
        Ok(Post::find_by_id(&self.pool, id).await?)
    }

    async fn categories(&self) -> Result<Vec<PostCategory>, RepositoryError> {
        Ok(PostCategory::list(&self.pool).await?)
    }
}

/// Worksheet records backed by the `worksheets` table, with the learner
/// favorites relation.
pub struct PgWorksheetStore {
    pool: PgPool,
}

impl PgWorksheetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgWorksheetStore {
    type Record = Worksheet;
    type Category = WorksheetCategory;

    async fn find(
        &self,
        filter: &ListingFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Worksheet>, RepositoryError> {
        let sql = window_sql("worksheets", filter, true, offset, limit);
        let records = sqlx::query_as::<_, Worksheet>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get(&self, id: i64) -> Result<Option<Worksheet>, RepositoryError> {
        Ok(Worksheet::find_by_id(&self.pool, id).await?)
    }

    async fn categories(&self) -> Result<Vec<WorksheetCategory>, RepositoryError> {
        Ok(WorksheetCategory::list(&self.pool).await?)
    }
}

#[async_trait]
impl FavoritesSource for PgWorksheetStore {
    async fn favorites_of(&self, learner: LearnerId) -> Result<Vec<Worksheet>, RepositoryError> {
        // Ordered by the join row's serial key: insertion order, duplicates
        // included.
        let records = sqlx::query_as::<_, Worksheet>(
            r#"
            SELECT w.id, w.name, w.pdf_url, w.video_url, w.category_id, w.author_id
            FROM worksheets w
            INNER JOIN learner_favorites f ON f.worksheet_id = w.id
            WHERE f.learner_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(learner.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn add_favorite(&self, learner: LearnerId, record_id: i64) -> Result<(), FavoriteError> {
        // Append-if-exists as one atomic statement: zero rows affected means
        // the worksheet is missing.
        let result = sqlx::query(
            r#"
            INSERT INTO learner_favorites (learner_id, worksheet_id)
            SELECT $1, id FROM worksheets WHERE id = $2
            "#,
        )
        .bind(learner.0)
        .bind(record_id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(FavoriteError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_window() {
        let sql = window_sql("posts", &ListingFilter::All, false, 0, 5);

        assert!(sql.contains("FROM \"posts\""));
        assert!(sql.contains("ORDER BY \"id\" DESC"));
        assert!(sql.contains("LIMIT 5"));
        assert!(sql.contains("OFFSET 0"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn category_window() {
        let sql = window_sql("posts", &ListingFilter::Category(3), false, 10, 5);

        assert!(sql.contains("\"category_id\" = 3"));
        assert!(sql.contains("OFFSET 10"));
    }

    #[test]
    fn author_window() {
        let sql = window_sql("worksheets", &ListingFilter::Author(2), true, 18, 9);

        assert!(sql.contains("\"author_id\" = 2"));
        assert!(sql.contains("LIMIT 9"));
        assert!(sql.contains("OFFSET 18"));
    }

    #[test]
    fn author_filter_without_author_dimension_restricts() {
        let sql = window_sql("posts", &ListingFilter::Author(2), false, 0, 5);

        assert!(sql.contains("FALSE"), "should restrict, not widen: {sql}");
        assert!(!sql.contains("author_id"));
    }

    #[test]
    fn single_window_selects_by_id() {
        let sql = window_sql("worksheets", &ListingFilter::Single(7), true, 0, 1);

        assert!(sql.contains("\"id\" = 7"));
    }

    #[test]
    fn lookahead_window_probes_one_record() {
        // Lookahead for page 1 of a 9-per-page listing.
        let sql = window_sql("worksheets", &ListingFilter::Category(2), true, 18, 1);

        assert!(sql.contains("LIMIT 1"));
        assert!(sql.contains("OFFSET 18"));
    }
}
