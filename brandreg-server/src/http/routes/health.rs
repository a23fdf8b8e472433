//! Liveness endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `APP_VERSION`, not the crate version
    pub version: String,
}

/// GET /health - never touches the store
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.settings.app_version.clone(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, StoreConfig};

    #[tokio::test]
    async fn reports_configured_version_without_store() {
        let mut settings = Settings::with_store(StoreConfig::default());
        settings.app_version = "2.3.1".into();
        let state = Arc::new(AppState::new(settings));

        let Json(body) = health(State(state.clone())).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, "2.3.1");
        assert_eq!(state.store.generation(), 0);
    }
}
