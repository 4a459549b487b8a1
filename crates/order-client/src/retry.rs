//! Retry loop with capped exponential backoff.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use order_core::LookupError;

/// Bounds for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, first try included. Clamped to ≥ 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Delay before the retry that follows failed attempt `attempt` (1-based):
/// `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
    // The shift is bounded so the multiplier cannot overflow; the cap
    // dominates long before 2^16 anyway.
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = policy.base_delay.saturating_mul(1u32 << exponent);
    delay.min(policy.max_delay)
}

/// Run `op` until it succeeds, fails terminally, or exhausts the policy.
///
/// `op` receives the 1-based attempt number. Retryable errors (see
/// [`LookupError::is_retryable`]) are retried after the backoff delay;
/// terminal errors and exhaustion surface the last error unchanged.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, LookupError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, LookupError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "lookup succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                let delay = backoff_delay(policy, attempt);
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "lookup attempt failed, retrying"
                );
                sleep(delay).await;
            }
            Err(err) => {
                warn!(attempt, error = %err, "lookup failed");
                return Err(err);
            }
        }
    }
}
