//! Admin authentication routes (login, logout).

use anyhow::Context;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::verify_password;
use crate::session::SESSION_ADMIN;
use crate::state::AppState;

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
}

/// Login request body.
#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
}

async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<LoginResponse>> {
    // Verify the password even on a username mismatch so both failure paths
    // take comparable time.
    let password_ok = verify_password(state.admin_password_hash(), &form.password);
    let username_ok = form.username == state.admin_username();

    if !(password_ok && username_ok) {
        return Err(AppError::Unauthorized);
    }

    session
        .insert(SESSION_ADMIN, true)
        .await
        .context("failed to write session")?;

    info!("admin logged in");

    Ok(Json(LoginResponse { success: true }))
}

async fn logout(session: Session) -> AppResult<StatusCode> {
    session
        .remove::<bool>(SESSION_ADMIN)
        .await
        .context("failed to clear session")?;

    Ok(StatusCode::NO_CONTENT)
}
