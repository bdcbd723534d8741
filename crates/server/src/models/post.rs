//! Blog post models: posts and their categories.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    /// Monotonically assigned identity; descending id is newest first.
    pub id: i64,

    /// Unique title.
    pub name: String,

    /// Post body (HTML).
    pub content: String,

    /// Category bucket this post belongs to.
    pub category_id: i64,
}

/// A blog post category.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostCategory {
    pub id: i64,

    /// Unique display name.
    pub name: String,
}

/// Input for creating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub name: String,
    pub content: String,
    pub category_id: i64,
}

/// Input for updating a post.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    pub name: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i64>,
}

/// Input for creating a post category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostCategory {
    pub name: String,
}

impl Post {
    /// Find a post by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, Self>(
            "SELECT id, name, content, category_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch post")?;

        Ok(post)
    }

    /// Create a new post.
    pub async fn create(pool: &PgPool, input: CreatePost) -> Result<Self> {
        let post = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO posts (name, content, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, content, category_id
            "#,
        )
        .bind(&input.name)
        .bind(&input.content)
        .bind(input.category_id)
        .fetch_one(pool)
        .await
        .context("failed to create post")?;

        Ok(post)
    }

    /// Update a post.
    pub async fn update(pool: &PgPool, id: i64, input: UpdatePost) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let name = input.name.unwrap_or(current.name);
        let content = input.content.unwrap_or(current.content);
        let category_id = input.category_id.unwrap_or(current.category_id);

        sqlx::query("UPDATE posts SET name = $1, content = $2, category_id = $3 WHERE id = $4")
            .bind(&name)
            .bind(&content)
            .bind(category_id)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to update post")?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a post.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete post")?;

        Ok(result.rows_affected() > 0)
    }
}

impl PostCategory {
    /// Find a category by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let category =
            sqlx::query_as::<_, Self>("SELECT id, name FROM post_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await
                .context("failed to fetch post category")?;

        Ok(category)
    }

    /// List all categories in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Self>("SELECT id, name FROM post_categories ORDER BY id")
                .fetch_all(pool)
                .await
                .context("failed to list post categories")?;

        Ok(categories)
    }

    /// Create a new category.
    pub async fn create(pool: &PgPool, input: CreatePostCategory) -> Result<Self> {
        let category = sqlx::query_as::<_, Self>(
            "INSERT INTO post_categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(pool)
        .await
        .context("failed to create post category")?;

        Ok(category)
    }

    /// Rename a category.
    pub async fn rename(pool: &PgPool, id: i64, name: &str) -> Result<Option<Self>> {
        if Self::find_by_id(pool, id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query("UPDATE post_categories SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to rename post category")?;

        Self::find_by_id(pool, id).await
    }

    /// Delete a category.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete post category")?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if a category exists.
    pub async fn exists(pool: &PgPool, id: i64) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM post_categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await
                .context("failed to check post category existence")?;

        Ok(exists)
    }
}
