//! Worksheet author model.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A worksheet author. Authors are a bucket dimension for worksheet
/// filtering and are listed publicly on the contact page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,

    /// Unique display name.
    pub name: String,

    pub email: Option<String>,

    /// A few words about the author.
    pub about: Option<String>,

    pub screenname: Option<String>,
}

/// Input for creating an author.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub email: Option<String>,
    pub about: Option<String>,
    pub screenname: Option<String>,
}

/// Input for updating an author.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
    pub screenname: Option<String>,
}

impl Author {
    /// Find an author by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let author = sqlx::query_as::<_, Self>(
            "SELECT id, name, email, about, screenname FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch author")?;

        Ok(author)
    }

    /// List all authors in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let authors = sqlx::query_as::<_, Self>(
            "SELECT id, name, email, about, screenname FROM authors ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .context("failed to list authors")?;

        Ok(authors)
    }

    /// Create a new author.
    pub async fn create(pool: &PgPool, input: CreateAuthor) -> Result<Self> {
        let author = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO authors (name, email, about, screenname)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, about, screenname
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.about)
        .bind(&input.screenname)
        .fetch_one(pool)
        .await
        .context("failed to create author")?;

        Ok(author)
    }

    /// Update an author.
    pub async fn update(pool: &PgPool, id: i64, input: UpdateAuthor) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let name = input.name.unwrap_or(current.name);
        let email = input.email.or(current.email);
        let about = input.about.or(current.about);
        let screenname = input.screenname.or(current.screenname);

        sqlx::query(
            "UPDATE authors SET name = $1, email = $2, about = $3, screenname = $4 WHERE id = $5",
        )
        .bind(&name)
        .bind(&email)
        .bind(&about)
        .bind(&screenname)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update author")?;

        Self::find_by_id(pool, id).await
    }

    /// Delete an author.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete author")?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if an author exists.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
            .context("failed to check author existence")?;

        Ok(exists)
    }
}
