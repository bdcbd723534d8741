//! Worksheet models: worksheets and their categories.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A downloadable worksheet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Worksheet {
    /// Monotonically assigned identity; descending id is newest first.
    pub id: i64,

    /// Unique title.
    pub name: String,

    /// Stored filename of the uploaded PDF, if one has been attached.
    pub pdf_url: Option<String>,

    /// Optional companion video URL.
    pub video_url: Option<String>,

    /// Category bucket.
    pub category_id: i64,

    /// Creating author; a second bucket dimension.
    pub author_id: i64,
}

/// A worksheet category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorksheetCategory {
    pub id: i64,

    /// Unique display name.
    pub name: String,
}

/// Input for creating a worksheet.
#[derive(Debug, Clone)]
pub struct CreateWorksheet {
    pub name: String,
    pub pdf_url: Option<String>,
    pub video_url: Option<String>,
    pub category_id: i64,
    pub author_id: i64,
}

/// Input for updating a worksheet.
#[derive(Debug, Clone, Default)]
pub struct UpdateWorksheet {
    pub name: Option<String>,
    pub pdf_url: Option<String>,
    pub video_url: Option<String>,
    pub category_id: Option<i64>,
    pub author_id: Option<i64>,
}

/// Input for creating a worksheet category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorksheetCategory {
    pub name: String,
}

impl Worksheet {
    /// Find a worksheet by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let worksheet = sqlx::query_as::<_, Self>(
            "SELECT id, name, pdf_url, video_url, category_id, author_id FROM worksheets WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch worksheet")?;

        Ok(worksheet)
    }

    /// Create a new worksheet.
    pub async fn create(pool: &PgPool, input: CreateWorksheet) -> Result<Self> {
        let worksheet = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO worksheets (name, pdf_url, video_url, category_id, author_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, pdf_url, video_url, category_id, author_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.pdf_url)
        .bind(&input.video_url)
        .bind(input.category_id)
        .bind(input.author_id)
        .fetch_one(pool)
        .await
        .context("failed to create worksheet")?;

        Ok(worksheet)
    }

    /// Update a worksheet.
    pub async fn update(pool: &PgPool, id: i64, input: UpdateWorksheet) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let name = input.name.unwrap_or(current.name);
        let pdf_url = input.pdf_url.or(current.pdf_url);
        let video_url = input.video_url.or(current.video_url);
        let category_id = input.category_id.unwrap_or(current.category_id);
        let author_id = input.author_id.unwrap_or(current.author_id);

        sqlx::query(
            r#"
            UPDATE worksheets
            SET name = $1, pdf_url = $2, video_url = $3, category_id = $4, author_id = $5
            WHERE id = $6
            "#,
        )
        .bind(&name)
        .bind(&pdf_url)
        .bind(&video_url)
        .bind(category_id)
        .bind(author_id)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update worksheet")?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a worksheet (cascades its favorites rows).
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM worksheets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete worksheet")?;

        Ok(result.rows_affected() > 0)
    }
}

impl WorksheetCategory {
    /// Find a category by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let category =
            sqlx::query_as::<_, Self>("SELECT id, name FROM worksheet_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to fetch worksheet category")?;

        Ok(category)
    }

    /// List all categories in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Self>("SELECT id, name FROM worksheet_categories ORDER BY id")
                .fetch_all(pool)
                .await
                .context("failed to list worksheet categories")?;

        Ok(categories)
    }

    /// Create a new category.
    pub async fn create(pool: &PgPool, input: CreateWorksheetCategory) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            "INSERT INTO worksheet_categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(pool)
        .await
        .context("failed to create worksheet category")?;

        Ok(category)
    }

    /// Rename a category.
    pub async fn rename(pool: &PgPool, id: i64, name: &str) -> Result<Option<Self>> {
        if Self::find_by_id(pool, id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE worksheet_categories SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to rename worksheet category")?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a category.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM worksheet_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete worksheet category")?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a category exists.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM worksheet_categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await
                .context("failed to check worksheet category existence")?;

        Ok(exists)
    }
}
