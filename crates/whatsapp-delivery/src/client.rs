//! WhatsApp message API client.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DeliveryConfig;
use crate::error::DeliveryError;

/// Outgoing text message payload.
#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

impl<'a> TextMessage<'a> {
    fn new(to: &'a str, body: &'a str) -> Self {
        Self {
            to,
            kind: "text",
            text: TextBody { body },
        }
    }
}

/// Client for sending messages through the WhatsApp API.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: Client,
    config: DeliveryConfig,
}

impl WhatsAppClient {
    /// Build a client from the given configuration.
    pub fn new(config: DeliveryConfig) -> Result<Self, DeliveryError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    /// Send a text message to a recipient.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), DeliveryError> {
        debug!(to, chars = body.chars().count(), "sending WhatsApp message");

        let payload = TextMessage::new(to, body);
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        info!(to, "message delivered");
        Ok(())
    }
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("api_url", &self.config.api_url)
            .finish()
    }
}
