//! Learner accounts.
//!
//! Learners authenticate with email + password and own an insertion-ordered
//! favorites relation over worksheets (read and appended through the listing
//! engine's favorites overlay, not through this model).

use anyhow::{Context, Result};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A learner account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Learner {
    pub id: i64,

    pub name: String,

    /// Unique login identifier.
    pub email: String,

    pub screenname: Option<String>,

    /// Argon2id password hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl Learner {
    /// Find a learner by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>> {
        let learner = sqlx::query_as::<_, Self>(
            "SELECT id, name, email, screenname, password FROM learners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch learner")?;

        Ok(learner)
    }

    /// Find a learner by login email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>> {
        let learner = sqlx::query_as::<_, Self>(
            "SELECT id, name, email, screenname, password FROM learners WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("failed to fetch learner by email")?;

        Ok(learner)
    }

    /// Replace the learner's password hash.
    pub async fn update_password(pool: &PgPool, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE learners SET password = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(pool)
            .await
            .context("failed to update learner password")?;

        Ok(result.rows_affected() > 0)
    }

    /// Verify a candidate password against the stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(&self.password, password)
    }
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Verify a candidate password against an Argon2 hash string. An empty or
/// malformed hash never verifies.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if hash.is_empty() {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
