//! Resilient client for the upstream order-status API.
//!
//! Wraps a single reqwest client with a per-attempt timeout, classifies
//! failures into retryable and terminal kinds, and retries retryable ones
//! with capped exponential backoff. Implements [`order_core::OrderLookup`],
//! the seam the dispatcher consumes.

mod client;
mod config;
mod retry;

pub use client::ResilientOrderClient;
pub use config::OrderApiConfig;
pub use retry::{backoff_delay, retry_with_backoff, RetryPolicy};
