//! Shared handler helpers: session identity extraction and small input
//! validation utilities.

use anyhow::Context;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::listing::LearnerId;
use crate::session::{SESSION_ADMIN, SESSION_LEARNER_ID};

/// Require the admin session flag; Unauthorized otherwise.
pub async fn require_admin(session: &Session) -> AppResult<()> {
    let logged_in: bool = session
        .get(SESSION_ADMIN)
        .await
        .context("failed to read session")?
        .unwrap_or(false);

    if !logged_in {
        return Err(AppError::Unauthorized);
    }

    Ok(())
}

/// The authenticated learner's identity, if any.
pub async fn current_learner(session: &Session) -> AppResult<Option<LearnerId>> {
    let learner_id: Option<i64> = session
        .get(SESSION_LEARNER_ID)
        .await
        .context("failed to read session")?;

    Ok(learner_id.map(LearnerId))
}

/// Require a learner session; Unauthorized otherwise.
pub async fn require_learner(session: &Session) -> AppResult<LearnerId> {
    current_learner(session).await?.ok_or(AppError::Unauthorized)
}

/// Validate a short required name/title field (1..=64 characters).
pub fn validate_name(field: &str, value: &str) -> AppResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    if trimmed.chars().count() > 64 {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most 64 characters"
        )));
    }
    Ok(())
}
