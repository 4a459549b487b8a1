//! Error types for the bot API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use order_core::LookupError;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Webhook body carried no entries.
    #[error("Entry no puede estar vacío")]
    EmptyEntry,

    /// Webhook body did not contain an extractable message.
    #[error("Estructura de mensaje no válida")]
    BadMessageStructure,

    /// The extracted message text was empty.
    #[error("Mensaje no válido o vacío")]
    EmptyMessage,

    /// Input rejected before any lookup (filter hit or invalid format).
    #[error("{0}")]
    Rejected(String),

    /// Admin credentials missing or wrong.
    #[error("No autorizado")]
    Unauthorized,

    /// Direct lookup found no order.
    #[error("Pedido con código {0} no encontrado")]
    OrderNotFound(String),

    /// Direct lookup failed upstream.
    #[error("Error consultando el pedido: {0}")]
    Lookup(LookupError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::EmptyEntry | ApiError::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadMessageStructure | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Lookup(err) => {
                tracing::error!("direct lookup failed: {}", err);
                StatusCode::BAD_GATEWAY
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::EmptyEntry.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::OrderNotFound("PED-123".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Lookup(LookupError::Timeout).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
