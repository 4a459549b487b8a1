//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub cache_size: usize,
    pub recent_failures: usize,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        cache_size: state.dispatcher.cache_size().await,
        recent_failures: state.dispatcher.failure_count(),
    })
}
