use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub games: usize,
    pub site_root: String,
}

/// Health check endpoint. Open even when the API requires a token.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let games = state.store.read().await.catalog().games.len();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        games,
        site_root: state.writer.root().display().to_string(),
    })
}
