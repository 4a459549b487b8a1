//! Configuration for the order-status client.

use std::time::Duration;

use order_core::TrackingCode;

/// Configuration for connecting to the order-status provider.
#[derive(Debug, Clone)]
pub struct OrderApiConfig {
    /// Base URL of the provider (e.g., "https://pedidos.example.com/api").
    pub base_url: String,
    /// Per-attempt request timeout.
    pub request_timeout: Duration,
    /// Maximum number of attempts per lookup, first try included.
    pub max_attempts: u32,
    /// Backoff delay after the first failed attempt.
    pub base_delay: Duration,
    /// Upper bound on any single backoff delay.
    pub max_delay: Duration,
}

impl OrderApiConfig {
    /// Create a configuration with the given base URL and default limits.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(10),
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Override the per-attempt timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Override the backoff delays.
    pub fn with_backoff(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// URL of the status resource for a tracking code.
    pub fn order_url(&self, code: &TrackingCode) -> String {
        format!(
            "{}/pedidos/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(code.as_str())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_url_joins_cleanly() {
        let code = TrackingCode::parse("PED-123").unwrap();
        let config = OrderApiConfig::new("http://localhost:9000/api/");
        assert_eq!(
            config.order_url(&code),
            "http://localhost:9000/api/pedidos/PED-123"
        );

        let config = OrderApiConfig::new("http://localhost:9000/api");
        assert_eq!(
            config.order_url(&code),
            "http://localhost:9000/api/pedidos/PED-123"
        );
    }
}
