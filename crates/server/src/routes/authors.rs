//! Author routes: admin CRUD and the public contact listing.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::{Author, CreateAuthor, UpdateAuthor};
use crate::state::AppState;

use super::helpers::{require_admin, validate_name};

/// Create the authors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", get(contact))
        .route("/add_author", post(add_author))
        .route("/edit_author/{id}", post(edit_author))
        .route("/delete_author/{id}", post(delete_author))
}

#[derive(Serialize)]
struct ContactResponse {
    authors: Vec<Author>,
}

/// Author form body.
#[derive(Debug, Deserialize)]
struct AuthorForm {
    name: String,
    email: Option<String>,
    about: Option<String>,
    screenname: Option<String>,
}

async fn contact(State(state): State<AppState>) -> AppResult<Json<ContactResponse>> {
    let authors = Author::list(state.db()).await?;
    Ok(Json(ContactResponse { authors }))
}

async fn add_author(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AuthorForm>,
) -> AppResult<(StatusCode, Json<Author>)> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let created = Author::create(
        state.db(),
        CreateAuthor {
            name: form.name.trim().to_string(),
            email: form.email,
            about: form.about,
            screenname: form.screenname,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn edit_author(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Json<Author>> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let updated = Author::update(
        state.db(),
        id,
        UpdateAuthor {
            name: Some(form.name.trim().to_string()),
            email: form.email,
            about: form.about,
            screenname: form.screenname,
        },
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

async fn delete_author(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    if !Author::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
