//! The upstream-lookup seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::status::OrderStatusResult;
use crate::tracking::TrackingCode;

/// Failures from an order-status lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request (or the overall lookup deadline) timed out.
    #[error("upstream request timed out")]
    Timeout,

    /// The upstream could not be reached at the transport level.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream reports no order for the code.
    #[error("no order matches the tracking code")]
    NotFound,

    /// The upstream answered with a non-success HTTP status.
    #[error("upstream error: HTTP {0}")]
    Upstream(u16),

    /// The upstream answered but the body could not be decoded.
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),
}

impl LookupError {
    /// Whether a retry can plausibly succeed.
    ///
    /// Timeouts and transport failures are transient; 5xx means the
    /// provider is present but unhealthy, the same class. NotFound and
    /// 4xx-class statuses are answers, not outages.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Unreachable(_) => true,
            Self::Upstream(status) => *status >= 500,
            Self::NotFound | Self::Decode(_) => false,
        }
    }

    /// Short stable label for logs and the failure window.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Unreachable(_) => "unreachable",
            Self::NotFound => "not_found",
            Self::Upstream(_) => "upstream",
            Self::Decode(_) => "decode",
        }
    }
}

/// A provider of order status by tracking code.
///
/// This trait is object-safe and can be used with `Box<dyn OrderLookup>`
/// or `Arc<dyn OrderLookup>`. The production implementation is the
/// resilient HTTP client; tests substitute scripted ones.
#[async_trait]
pub trait OrderLookup: Send + Sync {
    /// Fetch the current status for a tracking code.
    async fn fetch_status(&self, code: &TrackingCode) -> Result<OrderStatusResult, LookupError>;

    /// Human-readable name for this lookup implementation.
    fn name(&self) -> &str;
}
