//! Route handlers for the bot API.

pub mod cache;
pub mod health;
pub mod orders;
pub mod webhook;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Webhook intake
        .route("/webhook", post(webhook::webhook))
        // Health check
        .route("/health", get(health::health))
        // Direct lookup
        .route("/api/v1/orders/:user_id/:code", get(orders::get_order))
        // Admin
        .route("/cache/clear", post(cache::clear))
}
