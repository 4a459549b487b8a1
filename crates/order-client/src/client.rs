//! The order-status HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use order_core::{LookupError, OrderLookup, OrderStatus, OrderStatusResult, TrackingCode};

use crate::config::OrderApiConfig;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// Wire representation of the provider's status response.
#[derive(Debug, Deserialize)]
struct OrderStatusResponse {
    #[serde(default)]
    codigo: Option<String>,
    estado: String,
    #[serde(default)]
    producto: Option<String>,
    #[serde(default)]
    cliente: Option<String>,
    #[serde(default)]
    precio_total: Option<String>,
    #[serde(default)]
    fecha: Option<String>,
}

impl OrderStatusResponse {
    /// Convert into the domain result.
    ///
    /// The provider may omit or reformat the code; the requested one is
    /// authoritative when the echoed code does not validate.
    fn into_result(self, requested: &TrackingCode) -> OrderStatusResult {
        let code = self
            .codigo
            .as_deref()
            .and_then(|c| TrackingCode::parse(c).ok())
            .unwrap_or_else(|| requested.clone());

        let mut result = OrderStatusResult::new(
            code,
            OrderStatus::parse(&self.estado),
            self.producto.unwrap_or_default(),
        );
        if let Some(cliente) = self.cliente {
            result = result.with_customer(cliente);
        }
        if let Some(total) = self.precio_total {
            result = result.with_total(total);
        }
        if let Some(fecha) = self.fecha {
            result = result.with_updated_at(fecha);
        }
        result
    }
}

/// Client for the upstream order-status provider.
///
/// One reqwest client is built at construction with the per-attempt
/// timeout; each [`OrderLookup::fetch_status`] call runs the retry loop
/// on top of it. The client owns no state beyond the connection pool, so
/// it is cheap to clone and share.
#[derive(Clone)]
pub struct ResilientOrderClient {
    http: Client,
    config: OrderApiConfig,
}

impl ResilientOrderClient {
    /// Build a client from the given configuration.
    pub fn new(config: OrderApiConfig) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LookupError::Unreachable(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &OrderApiConfig {
        &self.config
    }

    /// Perform one attempt against the provider.
    async fn attempt(&self, code: &TrackingCode) -> Result<OrderStatusResult, LookupError> {
        let url = self.config.order_url(code);
        debug!(%url, "fetching order status");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Upstream(status.as_u16()));
        }

        let wire: OrderStatusResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout
            } else {
                LookupError::Decode(e.to_string())
            }
        })?;

        Ok(wire.into_result(code))
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.config.max_attempts,
            base_delay: self.config.base_delay,
            max_delay: self.config.max_delay,
        }
    }
}

/// Classify a transport-level reqwest error.
fn classify_transport(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else {
        LookupError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl OrderLookup for ResilientOrderClient {
    async fn fetch_status(&self, code: &TrackingCode) -> Result<OrderStatusResult, LookupError> {
        let policy = self.retry_policy();
        retry_with_backoff(&policy, |_attempt| self.attempt(code)).await
    }

    fn name(&self) -> &str {
        "ResilientOrderClient"
    }
}

impl std::fmt::Debug for ResilientOrderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientOrderClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> TrackingCode {
        TrackingCode::parse(s).unwrap()
    }

    fn fast_config(base_url: &str) -> OrderApiConfig {
        OrderApiConfig::new(base_url)
            .with_request_timeout(Duration::from_secs(2))
            .with_backoff(Duration::from_millis(5), Duration::from_millis(20))
    }

    #[tokio::test]
    async fn parses_a_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "codigo": "PED-123",
                "estado": "enviado",
                "producto": "Libro de Rust",
                "cliente": "Ana",
                "precio_total": "45.00 USD",
                "fecha": "2026-08-01",
            })))
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("PED-123")).await.unwrap();

        assert_eq!(result.code, code("PED-123"));
        assert_eq!(result.status, OrderStatus::Shipped);
        assert_eq!(result.description, "Libro de Rust");
        assert_eq!(result.customer.as_deref(), Some("Ana"));
        assert_eq!(result.total.as_deref(), Some("45.00 USD"));
        assert_eq!(result.updated_at.as_deref(), Some("2026-08-01"));
    }

    #[tokio::test]
    async fn missing_code_falls_back_to_the_requested_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/ORD-456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "estado": "pendiente",
            })))
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("ORD-456")).await.unwrap();

        assert_eq!(result.code, code("ORD-456"));
        assert_eq!(result.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn not_found_is_terminal_with_zero_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/ABC-999"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("ABC-999")).await;

        assert_eq!(result, Err(LookupError::NotFound));
        server.verify().await;
    }

    #[tokio::test]
    async fn client_errors_are_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("PED-123")).await;

        assert_eq!(result, Err(LookupError::Upstream(422)));
        server.verify().await;
    }

    #[tokio::test]
    async fn server_errors_retry_up_to_the_cap() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("PED-123")).await;

        assert_eq!(result, Err(LookupError::Upstream(503)));
        server.verify().await;
    }

    #[tokio::test]
    async fn recovers_when_the_provider_comes_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "estado": "entregado",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("PED-123")).await.unwrap();

        assert_eq!(result.status, OrderStatus::Delivered);
        server.verify().await;
    }

    #[tokio::test]
    async fn unparseable_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pedidos/PED-123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ResilientOrderClient::new(fast_config(&server.uri())).unwrap();
        let result = client.fetch_status(&code("PED-123")).await;

        assert!(matches!(result, Err(LookupError::Decode(_))));
        server.verify().await;
    }

    #[tokio::test]
    async fn unreachable_upstream_exhausts_attempts() {
        // Bind a port, then drop the listener so connections are refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = fast_config(&format!("http://{}", addr)).with_max_attempts(3);
        let client = ResilientOrderClient::new(config).unwrap();

        let started = std::time::Instant::now();
        let result = client.fetch_status(&code("PED-123")).await;

        assert!(matches!(result, Err(LookupError::Unreachable(_))));
        // Two backoff waits at 5ms and 10ms.
        assert!(started.elapsed() >= Duration::from_millis(15));
    }
}
