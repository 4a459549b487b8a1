//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Bot API configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Upstream order-status API base URL.
    pub orders_api_url: String,
    /// WhatsApp send-message endpoint URL.
    pub whatsapp_api_url: String,
    /// WhatsApp bearer token.
    pub whatsapp_token: String,
    /// Bearer token gating `/cache/clear`.
    pub admin_token: String,
    /// Cache TTL; zero disables caching.
    pub cache_ttl: Duration,
    /// Upstream attempt cap.
    pub max_retries: u32,
    /// Per-attempt upstream timeout.
    pub request_timeout: Duration,
    /// Overall per-request lookup deadline.
    pub lookup_deadline: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `BIND_ADDR` | Server bind address | `127.0.0.1:8700` |
    /// | `ORDERS_API_URL` | Order-status API base URL | (required) |
    /// | `WHATSAPP_API_URL` | WhatsApp send endpoint | (required) |
    /// | `WHATSAPP_TOKEN` | WhatsApp bearer token | (required) |
    /// | `ADMIN_TOKEN` | Token for `/cache/clear` | (required) |
    /// | `CACHE_TTL_SECS` | Cache TTL; ≤ 0 disables caching | `300` |
    /// | `MAX_RETRIES` | Upstream attempt cap | `3` |
    /// | `REQUEST_TIMEOUT_SECS` | Per-attempt timeout | `10` |
    /// | `LOOKUP_DEADLINE_SECS` | Overall lookup deadline | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8700".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let orders_api_url = require_url("ORDERS_API_URL")?;
        let whatsapp_api_url = require_url("WHATSAPP_API_URL")?;
        let whatsapp_token = require("WHATSAPP_TOKEN")?;
        let admin_token = require("ADMIN_TOKEN")?;

        let cache_ttl = ttl_from_secs(parse_or("CACHE_TTL_SECS", 300i64)?);
        let max_retries = parse_or("MAX_RETRIES", 3u32)?;
        let request_timeout = Duration::from_secs(parse_or("REQUEST_TIMEOUT_SECS", 10u64)?);
        let lookup_deadline = Duration::from_secs(parse_or("LOOKUP_DEADLINE_SECS", 30u64)?);

        Ok(Self {
            addr,
            orders_api_url,
            whatsapp_api_url,
            whatsapp_token,
            admin_token,
            cache_ttl,
            max_retries,
            request_timeout,
            lookup_deadline,
        })
    }
}

/// A TTL of zero or less disables caching.
pub(crate) fn ttl_from_secs(secs: i64) -> Duration {
    if secs <= 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(secs as u64)
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn require_url(name: &'static str) -> Result<String, ConfigError> {
    let value = require(name)?;
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigError::InvalidUrl(name))
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR format")]
    InvalidAddr,

    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{0} must start with http:// or https://")]
    InvalidUrl(&'static str),

    #[error("{0} must be an integer")]
    InvalidNumber(&'static str),
}
