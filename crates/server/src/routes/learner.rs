//! Learner routes: login/logout, password change, dashboard, and the
//! favorites append.

use anyhow::Context;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Learner, Worksheet, hash_password};
use crate::session::SESSION_LEARNER_ID;
use crate::state::AppState;

use super::helpers::require_learner;

/// Create the learner router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/learner_login", post(learner_login))
        .route("/learner_logout", get(learner_logout))
        .route("/learner_change_password/{id}", post(learner_change_password))
        .route("/learner_dashboard", get(learner_dashboard))
        .route("/add_favourite/{worksheet_id}", post(add_favourite))
}

/// Login request body.
#[derive(Debug, Deserialize)]
struct LearnerLoginForm {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct LearnerResponse {
    id: i64,
    name: String,
    screenname: Option<String>,
}

#[derive(Serialize)]
struct DashboardResponse {
    learner: LearnerResponse,
    favorites: Vec<Worksheet>,
}

/// Password change request body.
#[derive(Debug, Deserialize)]
struct ChangePasswordForm {
    password: String,
}

async fn learner_login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LearnerLoginForm>,
) -> AppResult<Json<LearnerResponse>> {
    let Some(learner) = Learner::find_by_email(state.db(), &form.email).await? else {
        return Err(AppError::Unauthorized);
    };

    if !learner.verify_password(&form.password) {
        return Err(AppError::Unauthorized);
    }

    session
        .insert(SESSION_LEARNER_ID, learner.id)
        .await
        .context("failed to write session")?;

    info!(learner_id = learner.id, "learner logged in");

    Ok(Json(LearnerResponse {
        id: learner.id,
        name: learner.name,
        screenname: learner.screenname,
    }))
}

async fn learner_logout(session: Session) -> AppResult<StatusCode> {
    session
        .remove::<i64>(SESSION_LEARNER_ID)
        .await
        .context("failed to clear session")?;

    Ok(StatusCode::NO_CONTENT)
}

async fn learner_change_password(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<ChangePasswordForm>,
) -> AppResult<StatusCode> {
    let learner = require_learner(&session).await?;

    // A learner may change only their own password.
    if learner.0 != id {
        return Err(AppError::Unauthorized);
    }

    if form.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let hash = hash_password(&form.password)?;
    if !Learner::update_password(state.db(), id, &hash).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn learner_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<DashboardResponse>> {
    let learner_id = require_learner(&session).await?;

    let learner = Learner::find_by_id(state.db(), learner_id.0)
        .await?
        .ok_or(AppError::NotFound)?;

    let favorites = state
        .worksheets()
        .favorites(learner_id)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    Ok(Json(DashboardResponse {
        learner: LearnerResponse {
            id: learner.id,
            name: learner.name,
            screenname: learner.screenname,
        },
        favorites,
    }))
}

async fn add_favourite(
    State(state): State<AppState>,
    session: Session,
    Path(worksheet_id): Path<i64>,
) -> AppResult<StatusCode> {
    let learner = require_learner(&session).await?;

    state
        .worksheets()
        .add_favorite(learner, worksheet_id)
        .await?;

    Ok(StatusCode::CREATED)
}
