//! Front page routes.

use axum::Router;
use axum::response::Json;
use axum::routing::get;
use serde::Serialize;

use crate::state::AppState;

/// Create the front router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
}

#[derive(Serialize)]
struct HomeResponse {
    site: &'static str,
    title: &'static str,
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        site: "quaderno",
        title: "Home",
    })
}
