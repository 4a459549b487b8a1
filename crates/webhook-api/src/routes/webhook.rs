//! WhatsApp webhook intake.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use dispatcher::compose;
use order_core::UserIdentity;

use crate::error::ApiError;
use crate::state::AppState;

/// Webhook request body: `entry → changes → value → messages`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    #[serde(default)]
    value: ChangeValue,
}

#[derive(Debug, Default, Deserialize)]
struct ChangeValue {
    #[serde(default)]
    messages: Vec<InboundMessage>,
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    text: Option<TextField>,
}

/// The provider sends text either as a plain string or as `{"body": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    Object { body: String },
    Plain(String),
}

impl WebhookPayload {
    fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Extract (sender, text) from the first message, if any.
    fn first_message(&self) -> Option<(&str, String)> {
        let message = self
            .entry
            .first()?
            .changes
            .first()?
            .value
            .messages
            .first()?;
        let from = message.from.as_deref()?;
        let text = match &message.text {
            Some(TextField::Object { body }) => body.clone(),
            Some(TextField::Plain(text)) => text.clone(),
            None => String::new(),
        };
        Some((from, text))
    }
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    status: &'static str,
    message: &'static str,
}

/// Main webhook endpoint.
///
/// Delivery failures are logged; the webhook request itself still
/// succeeds.
pub async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<WebhookResponse>, ApiError> {
    if payload.is_empty() {
        return Err(ApiError::EmptyEntry);
    }

    let (from, text) = payload.first_message().ok_or(ApiError::BadMessageStructure)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::EmptyMessage);
    }
    let user = UserIdentity::parse(from).map_err(|_| ApiError::BadMessageStructure)?;

    info!(user = %user, text, "webhook message received");

    let current = state.sessions.current(&user).await;
    let outcome = state.dispatcher.handle(&user, text, current).await;
    state.sessions.store(&user, outcome.next_state).await;

    if let Err(err) = state.delivery.send_text(user.as_str(), &outcome.reply).await {
        error!(user = %user, error = %err, "failed to deliver reply");
    }

    let message = if outcome.reply == compose::PROFANITY_WARNING {
        "Lenguaje inapropiado detectado"
    } else {
        "Mensaje procesado correctamente"
    };
    Ok(Json(WebhookResponse {
        status: "success",
        message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn extracts_text_from_body_object() {
        let payload = payload(serde_json::json!({
            "entry": [{
                "changes": [{
                    "value": {
                        "messages": [{
                            "from": "1234567890",
                            "text": { "body": "PED-123" }
                        }]
                    }
                }]
            }]
        }));

        assert_eq!(
            payload.first_message(),
            Some(("1234567890", "PED-123".to_string()))
        );
    }

    #[test]
    fn extracts_plain_string_text() {
        let payload = payload(serde_json::json!({
            "entry": [{
                "changes": [{
                    "value": {
                        "messages": [{
                            "from": "1234567890",
                            "text": "hola"
                        }]
                    }
                }]
            }]
        }));

        assert_eq!(
            payload.first_message(),
            Some(("1234567890", "hola".to_string()))
        );
    }

    #[test]
    fn empty_entry_is_detected() {
        assert!(payload(serde_json::json!({ "entry": [] })).is_empty());
        assert!(payload(serde_json::json!({})).is_empty());
    }

    #[test]
    fn missing_message_yields_none() {
        let payload = payload(serde_json::json!({
            "entry": [{ "changes": [{ "value": {} }] }]
        }));
        assert_eq!(payload.first_message(), None);
    }

    #[test]
    fn missing_sender_yields_none() {
        let payload = payload(serde_json::json!({
            "entry": [{
                "changes": [{
                    "value": { "messages": [{ "text": "hola" }] }
                }]
            }]
        }));
        assert_eq!(payload.first_message(), None);
    }
}
