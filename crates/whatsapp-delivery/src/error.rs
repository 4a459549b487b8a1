//! Error types for message delivery.

use thiserror::Error;

/// Errors sending a message through the WhatsApp API.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("WhatsApp API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
}
