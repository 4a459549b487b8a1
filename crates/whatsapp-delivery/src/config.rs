//! Configuration for the delivery client.

use std::time::Duration;

/// Configuration for the WhatsApp message API.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Full send-message endpoint URL.
    pub api_url: String,
    /// Bearer token for the API.
    pub token: String,
    /// Request timeout.
    pub request_timeout: Duration,
}

impl DeliveryConfig {
    /// Create a configuration with the default timeout.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: token.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Override the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
