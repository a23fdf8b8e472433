//! Root endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct IndexResponse {
    pub message: String,
}

/// GET /
async fn index(State(state): State<Arc<AppState>>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: format!("{} running", state.settings.app_name),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
