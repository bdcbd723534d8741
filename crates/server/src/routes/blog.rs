//! Blog routes: the post listing endpoint and admin CRUD for posts and
//! their categories.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::listing::{ListRequest, PageLink};
use crate::models::{CreatePost, CreatePostCategory, Post, PostCategory, UpdatePost};
use crate::state::AppState;

use super::helpers::{require_admin, validate_name};

/// Create the blog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blog", get(blog_page))
        .route("/add_post", post(add_post))
        .route("/edit_post/{id}", post(edit_post))
        .route("/delete_post/{id}", post(delete_post))
        .route("/add_blog_category", post(add_blog_category))
        .route("/edit_blog_category/{id}", post(edit_blog_category))
        .route("/delete_blog_category/{id}", post(delete_blog_category))
}

/// Raw listing identifiers from the query string.
#[derive(Debug, Deserialize)]
struct BlogListingParams {
    /// Single post id; overrides every other filter.
    post: Option<i64>,
    category: Option<i64>,
    #[serde(default)]
    page: i64,
}

#[derive(Serialize)]
struct BlogListingResponse {
    posts: Vec<Post>,
    categories: Vec<PostCategory>,
    prev: Option<PageLink>,
    next: Option<PageLink>,
}

/// Post form body.
#[derive(Debug, Deserialize)]
struct PostForm {
    title: String,
    content: String,
    category_id: i64,
}

/// Category form body.
#[derive(Debug, Deserialize)]
struct CategoryForm {
    name: String,
}

async fn blog_page(
    State(state): State<AppState>,
    Query(params): Query<BlogListingParams>,
) -> AppResult<Json<BlogListingResponse>> {
    let request = ListRequest {
        single_id: params.post,
        author_id: None,
        category_id: params.category,
        page: params.page,
    };

    let listing = state.posts().list(&request).await?;

    Ok(Json(BlogListingResponse {
        posts: listing.records,
        categories: listing.categories,
        prev: listing.prev,
        next: listing.next,
    }))
}

async fn add_post(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<PostForm>,
) -> AppResult<(StatusCode, Json<Post>)> {
    require_admin(&session).await?;
    validate_post_form(&state, &form).await?;

    let created = Post::create(
        state.db(),
        CreatePost {
            name: form.title.trim().to_string(),
            content: form.content,
            category_id: form.category_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn edit_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<PostForm>,
) -> AppResult<Json<Post>> {
    require_admin(&session).await?;
    validate_post_form(&state, &form).await?;

    let updated = Post::update(
        state.db(),
        id,
        UpdatePost {
            name: Some(form.title.trim().to_string()),
            content: Some(form.content),
            category_id: Some(form.category_id),
        },
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(updated))
}

async fn delete_post(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    if !Post::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn add_blog_category(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CategoryForm>,
) -> AppResult<(StatusCode, Json<PostCategory>)> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let created = PostCategory::create(
        state.db(),
        CreatePostCategory {
            name: form.name.trim().to_string(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn edit_blog_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<PostCategory>> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let renamed = PostCategory::rename(state.db(), id, form.name.trim())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(renamed))
}

async fn delete_blog_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    if !PostCategory::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn validate_post_form(state: &AppState, form: &PostForm) -> AppResult<()> {
    validate_name("title", &form.title)?;

    if form.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }

    if !PostCategory::exists(state.db(), form.category_id).await? {
        return Err(AppError::BadRequest("unknown category".to_string()));
    }

    Ok(())
}
