//! Direct order lookup endpoint.

use axum::extract::{Path, State};
use axum::Json;

use dispatcher::compose;
use order_core::{LookupError, OrderStatusResult, TrackingCode, UserIdentity};

use crate::error::ApiError;
use crate::state::AppState;

/// Look an order up without going through the chat pipeline.
///
/// The content filter still applies to both path segments before any
/// format validation or lookup.
pub async fn get_order(
    State(state): State<AppState>,
    Path((user_id, code)): Path<(String, String)>,
) -> Result<Json<OrderStatusResult>, ApiError> {
    if state.dispatcher.content_flagged(&user_id) || state.dispatcher.content_flagged(&code) {
        return Err(ApiError::Rejected(compose::profanity_warning().to_string()));
    }

    let user =
        UserIdentity::parse(&user_id).map_err(|e| ApiError::Rejected(e.to_string()))?;
    let code = TrackingCode::parse(&code).map_err(|e| ApiError::Rejected(e.to_string()))?;

    match state.dispatcher.lookup(&user, &code).await {
        Ok(result) => Ok(Json(result)),
        Err(LookupError::NotFound) => Err(ApiError::OrderNotFound(code.to_string())),
        Err(err) => Err(ApiError::Lookup(err)),
    }
}
