//! Application state shared across handlers.

use std::sync::Arc;

use dispatcher::Dispatcher;
use order_client::ResilientOrderClient;
use whatsapp_delivery::WhatsAppClient;

use crate::sessions::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Conversation pipeline.
    pub dispatcher: Arc<Dispatcher<ResilientOrderClient>>,
    /// Outbound delivery client.
    pub delivery: Arc<WhatsAppClient>,
    /// Per-user conversation sessions.
    pub sessions: SessionStore,
    /// Bearer token gating the admin cache endpoint.
    pub admin_token: Arc<str>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        dispatcher: Arc<Dispatcher<ResilientOrderClient>>,
        delivery: Arc<WhatsAppClient>,
        sessions: SessionStore,
        admin_token: &str,
    ) -> Self {
        Self {
            dispatcher,
            delivery,
            sessions,
            admin_token: Arc::from(admin_token),
        }
    }
}
