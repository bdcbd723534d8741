//! Uploaded file serving.
//!
//! Mounted under the configured files URL (default `/files`), so a stored
//! worksheet PDF is reachable at `<files_url>/worksheets/<filename>`.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Create the files router (nested under the configured files URL).
pub fn router() -> Router<AppState> {
    Router::new().route("/worksheets/{filename}", get(serve_worksheet_pdf))
}

async fn serve_worksheet_pdf(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<impl IntoResponse> {
    let data = state
        .files()
        .load_pdf(&filename)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::NotFound)?;

    Ok(([(header::CONTENT_TYPE, "application/pdf")], data))
}
