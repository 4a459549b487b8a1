//! HTTP transport for the WhatsApp order-tracking bot.
//!
//! Receives WhatsApp webhooks, runs them through the dispatcher pipeline,
//! and delivers the reply. Also exposes the direct lookup endpoint, the
//! health check, and the admin-gated cache clear.

mod config;
mod error;
mod routes;
mod sessions;
mod state;

use std::sync::Arc;

use dispatcher::{Dispatcher, DispatcherConfig, ProhibitedTermSet};
use lookup_cache::LookupCache;
use order_client::{OrderApiConfig, ResilientOrderClient};
use tracing::info;
use whatsapp_delivery::{DeliveryConfig, WhatsAppClient};

use crate::config::Config;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting order-tracking bot API");

    // Upstream order-status client
    let order_config = OrderApiConfig::new(&config.orders_api_url)
        .with_request_timeout(config.request_timeout)
        .with_max_attempts(config.max_retries);
    let lookup = Arc::new(ResilientOrderClient::new(order_config)?);

    // Cache and dispatcher
    let cache = Arc::new(LookupCache::new(config.cache_ttl));
    let dispatcher = Arc::new(Dispatcher::new(
        lookup,
        cache,
        ProhibitedTermSet::default(),
        DispatcherConfig {
            lookup_deadline: config.lookup_deadline,
            ..Default::default()
        },
    ));

    // Outbound delivery client
    let delivery_config = DeliveryConfig::new(&config.whatsapp_api_url, &config.whatsapp_token);
    let delivery = Arc::new(WhatsAppClient::new(delivery_config)?);

    // Build application state
    let state = AppState::new(
        dispatcher,
        delivery,
        SessionStore::new(),
        &config.admin_token,
    );

    // Build router
    let app = routes::router().with_state(state);

    // Start server
    info!(addr = %config.addr, "order-tracking bot API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
