//! Admin cache management.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ClearResponse {
    status: &'static str,
    message: &'static str,
}

/// Clear the lookup cache.
///
/// Requires `Authorization: Bearer <ADMIN_TOKEN>`. Bad credentials are
/// rejected before the cache is touched, and the rejection carries no
/// information about cache contents.
pub async fn clear(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ClearResponse>, ApiError> {
    let authorized = bearer_token(&headers)
        .map(|token| token == state.admin_token.as_ref())
        .unwrap_or(false);

    if !authorized {
        warn!("rejected cache clear with invalid credentials");
        return Err(ApiError::Unauthorized);
    }

    state.dispatcher.clear_cache().await;
    info!("cache cleared by administrator");

    Ok(Json(ClearResponse {
        status: "success",
        message: "Caché limpiado",
    }))
}

/// Extract the bearer token from an Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::HeaderValue;
    use dispatcher::{Dispatcher, DispatcherConfig, ProhibitedTermSet};
    use lookup_cache::LookupCache;
    use order_client::{OrderApiConfig, ResilientOrderClient};
    use order_core::{OrderStatus, OrderStatusResult, TrackingCode};
    use whatsapp_delivery::{DeliveryConfig, WhatsAppClient};

    use crate::sessions::SessionStore;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn app_state(admin_token: &str) -> (AppState, Arc<LookupCache>) {
        let lookup = Arc::new(
            ResilientOrderClient::new(OrderApiConfig::new("http://localhost:1")).unwrap(),
        );
        let cache = Arc::new(LookupCache::new(Duration::from_secs(300)));
        let dispatcher = Arc::new(Dispatcher::new(
            lookup,
            cache.clone(),
            ProhibitedTermSet::default(),
            DispatcherConfig::default(),
        ));
        let delivery = Arc::new(
            WhatsAppClient::new(DeliveryConfig::new("http://localhost:1", "token")).unwrap(),
        );
        let state = AppState::new(dispatcher, delivery, SessionStore::new(), admin_token);
        (state, cache)
    }

    #[test]
    fn extracts_bearer_tokens() {
        assert_eq!(
            bearer_token(&headers_with("Bearer secret-token")),
            Some("secret-token")
        );
    }

    #[test]
    fn rejects_other_schemes_and_absence() {
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn invalid_credentials_leave_the_cache_untouched() {
        let (state, cache) = app_state("secret-token");
        let entry = OrderStatusResult::new(
            TrackingCode::parse("PED-123").unwrap(),
            OrderStatus::Shipped,
            "Libro",
        );
        cache.put("u:PED-123", entry).await;

        let before = cache.len().await;
        let result = clear(State(state), headers_with("Bearer wrong-token")).await;

        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(cache.len().await, before);
    }

    #[tokio::test]
    async fn valid_credentials_clear_the_cache() {
        let (state, cache) = app_state("secret-token");
        let entry = OrderStatusResult::new(
            TrackingCode::parse("PED-123").unwrap(),
            OrderStatus::Shipped,
            "Libro",
        );
        cache.put("u:PED-123", entry).await;

        let result = clear(State(state), headers_with("Bearer secret-token")).await;

        assert!(result.is_ok());
        assert_eq!(cache.len().await, 0);
    }
}
