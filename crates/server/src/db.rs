//! Database connection pool management and schema bootstrap.

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

/// Create the schema if it does not exist yet. Idempotent; runs at startup.
///
/// `BIGSERIAL` keys give every entity a monotonically assigned identity that
/// is never reused; the listing engine sorts on it descending. The
/// `learner_favorites` serial key records insertion order and permits
/// duplicate (learner, worksheet) pairs.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS post_categories (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL UNIQUE,
            content TEXT NOT NULL,
            category_id BIGINT NOT NULL REFERENCES post_categories(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS worksheet_categories (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL UNIQUE,
            email VARCHAR(64),
            about VARCHAR(1200),
            screenname VARCHAR(64) UNIQUE
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS worksheets (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL UNIQUE,
            pdf_url VARCHAR(300),
            video_url VARCHAR(300),
            category_id BIGINT NOT NULL REFERENCES worksheet_categories(id),
            author_id BIGINT NOT NULL REFERENCES authors(id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS learners (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(64) NOT NULL,
            email VARCHAR(64) NOT NULL UNIQUE,
            screenname VARCHAR(64) UNIQUE,
            password VARCHAR(200) NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS learner_favorites (
            id BIGSERIAL PRIMARY KEY,
            learner_id BIGINT NOT NULL REFERENCES learners(id) ON DELETE CASCADE,
            worksheet_id BIGINT NOT NULL REFERENCES worksheets(id) ON DELETE CASCADE
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to create schema")?;
    }

    Ok(())
}
