//! Worksheet routes: the listing endpoint (with the learner favorites
//! overlay), the single-worksheet view, and admin CRUD with PDF upload.

use axum::Router;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::listing::{ListRequest, PageLink};
use crate::models::{
    Author, CreateWorksheet, CreateWorksheetCategory, UpdateWorksheet, Worksheet,
    WorksheetCategory,
};
use crate::state::AppState;

use super::helpers::{current_learner, require_admin, validate_name};

/// Create the worksheets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/worksheets_page", get(worksheets_page))
        .route("/specific_worksheet/{id}", get(specific_worksheet))
        .route("/add_worksheet", post(add_worksheet))
        .route("/edit_worksheet/{id}", post(edit_worksheet))
        .route("/delete_worksheet/{id}", post(delete_worksheet))
        .route("/add_worksheet_category", post(add_worksheet_category))
        .route("/edit_worksheet_category/{id}", post(edit_worksheet_category))
        .route(
            "/delete_worksheet_category/{id}",
            post(delete_worksheet_category),
        )
}

/// Raw listing identifiers from the query string.
#[derive(Debug, Deserialize)]
struct WorksheetListingParams {
    /// Single worksheet id; overrides every other filter.
    worksheet: Option<i64>,
    author: Option<i64>,
    category: Option<i64>,
    #[serde(default)]
    page: i64,
}

#[derive(Serialize)]
struct WorksheetResponse {
    #[serde(flatten)]
    worksheet: Worksheet,

    /// Public URL of the stored PDF, when one is attached.
    pdf_link: Option<String>,
}

impl WorksheetResponse {
    fn new(state: &AppState, worksheet: Worksheet) -> Self {
        let pdf_link = worksheet
            .pdf_url
            .as_deref()
            .map(|filename| state.files().pdf_url(filename));
        Self {
            worksheet,
            pdf_link,
        }
    }
}

#[derive(Serialize)]
struct WorksheetListingResponse {
    worksheets: Vec<Worksheet>,
    categories: Vec<WorksheetCategory>,
    prev: Option<PageLink>,
    next: Option<PageLink>,
    favorites: Vec<Worksheet>,
}

async fn worksheets_page(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<WorksheetListingParams>,
) -> AppResult<Json<WorksheetListingResponse>> {
    let learner = current_learner(&session).await?;

    let request = ListRequest {
        single_id: params.worksheet,
        author_id: params.author,
        category_id: params.category,
        page: params.page,
    };

    let listing = state.worksheets().list_for_learner(&request, learner).await?;

    Ok(Json(WorksheetListingResponse {
        worksheets: listing.records,
        categories: listing.categories,
        prev: listing.prev,
        next: listing.next,
        favorites: listing.favorites,
    }))
}

async fn specific_worksheet(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Json<WorksheetListingResponse>> {
    let learner = current_learner(&session).await?;

    let request = ListRequest {
        single_id: Some(id),
        ..ListRequest::default()
    };

    let listing = state.worksheets().list_for_learner(&request, learner).await?;

    Ok(Json(WorksheetListingResponse {
        worksheets: listing.records,
        categories: listing.categories,
        prev: listing.prev,
        next: listing.next,
        favorites: listing.favorites,
    }))
}

/// Multipart worksheet form collected into one value.
#[derive(Debug, Default)]
struct WorksheetForm {
    title: Option<String>,
    video_url: Option<String>,
    category_id: Option<i64>,
    author_id: Option<i64>,
    pdf: Option<(String, Vec<u8>)>,
}

impl WorksheetForm {
    /// Drain the multipart stream into the form fields.
    async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(read_text(field, "title").await?),
                "video_url" => {
                    let value = read_text(field, "video_url").await?;
                    if !value.trim().is_empty() {
                        form.video_url = Some(value);
                    }
                }
                "category_id" => form.category_id = Some(read_i64(field, "category_id").await?),
                "author_id" => form.author_id = Some(read_i64(field, "author_id").await?),
                "worksheet_pdf" => {
                    let filename = field
                        .file_name()
                        .unwrap_or("worksheet.pdf")
                        .to_string();
                    let data = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("failed to read upload: {e}"))
                    })?;
                    form.pdf = Some((filename, data.to_vec()));
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid {name}: {e}")))
}

async fn read_i64(field: axum::extract::multipart::Field<'_>, name: &str) -> AppResult<i64> {
    let text = read_text(field, name).await?;
    text.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{name} must be an integer")))
}

async fn add_worksheet(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<WorksheetResponse>)> {
    require_admin(&session).await?;

    let form = WorksheetForm::from_multipart(multipart).await?;

    let title = form
        .title
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
    validate_name("title", &title)?;

    let category_id = form
        .category_id
        .ok_or_else(|| AppError::BadRequest("category_id is required".to_string()))?;
    let author_id = form
        .author_id
        .ok_or_else(|| AppError::BadRequest("author_id is required".to_string()))?;
    validate_buckets(&state, category_id, author_id).await?;

    let (filename, data) = form
        .pdf
        .ok_or_else(|| AppError::BadRequest("worksheet_pdf is required".to_string()))?;
    let stored = state
        .files()
        .store_pdf(&filename, &data)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = Worksheet::create(
        state.db(),
        CreateWorksheet {
            name: title.trim().to_string(),
            pdf_url: Some(stored),
            video_url: form.video_url,
            category_id,
            author_id,
        },
    )
    .await?;

    let response = WorksheetResponse::new(&state, created);
    Ok((StatusCode::CREATED, Json(response)))
}

async fn edit_worksheet(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<WorksheetResponse>> {
    require_admin(&session).await?;

    let current = Worksheet::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    let form = WorksheetForm::from_multipart(multipart).await?;

    if let Some(ref title) = form.title {
        validate_name("title", title)?;
    }
    if let (Some(category_id), Some(author_id)) = (form.category_id, form.author_id) {
        validate_buckets(&state, category_id, author_id).await?;
    }

    // A replacement upload supersedes the stored PDF; the old file goes away
    // first, mirroring the replace-on-edit flow.
    let pdf_url = if let Some((filename, data)) = form.pdf {
        if let Some(ref old) = current.pdf_url {
            state
                .files()
                .remove_pdf(old)
                .await
                .map_err(AppError::Internal)?;
        }
        let stored = state
            .files()
            .store_pdf(&filename, &data)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Some(stored)
    } else {
        None
    };

    let updated = Worksheet::update(
        state.db(),
        id,
        UpdateWorksheet {
            name: form.title.map(|t| t.trim().to_string()),
            pdf_url,
            video_url: form.video_url,
            category_id: form.category_id,
            author_id: form.author_id,
        },
    )
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(WorksheetResponse::new(&state, updated)))
}

async fn delete_worksheet(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    let worksheet = Worksheet::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(ref pdf) = worksheet.pdf_url {
        state
            .files()
            .remove_pdf(pdf)
            .await
            .map_err(AppError::Internal)?;
    }

    Worksheet::delete(state.db(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Category form body.
#[derive(Debug, Deserialize)]
struct CategoryForm {
    name: String,
}

async fn add_worksheet_category(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CategoryForm>,
) -> AppResult<(StatusCode, Json<WorksheetCategory>)> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let created = WorksheetCategory::create(
        state.db(),
        CreateWorksheetCategory {
            name: form.name.trim().to_string(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn edit_worksheet_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Json(form): Json<CategoryForm>,
) -> AppResult<Json<WorksheetCategory>> {
    require_admin(&session).await?;
    validate_name("name", &form.name)?;

    let renamed = WorksheetCategory::rename(state.db(), id, form.name.trim())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(renamed))
}

async fn delete_worksheet_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    if !WorksheetCategory::delete(state.db(), id).await? {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn validate_buckets(state: &AppState, category_id: i64, author_id: i64) -> AppResult<()> {
    if !WorksheetCategory::exists(state.db(), category_id).await? {
        return Err(AppError::BadRequest("unknown category".to_string()));
    }
    if !Author::exists(state.db(), author_id).await? {
        return Err(AppError::BadRequest("unknown author".to_string()));
    }
    Ok(())
}
