//! The conversation pipeline.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use lookup_cache::LookupCache;
use order_core::{cache_key, LookupError, OrderLookup, OrderStatusResult, TrackingCode, UserIdentity};

use crate::compose;
use crate::intent::{classify, Intent};
use crate::metrics::{FailureRecord, FailureWindow};
use crate::filter::ProhibitedTermSet;
use crate::sanitize::sanitize;
use crate::session::ConversationState;

/// Default overall lookup deadline, retries included.
const DEFAULT_LOOKUP_DEADLINE: Duration = Duration::from_secs(30);

/// Default capacity of the recent-failure window.
const DEFAULT_FAILURE_WINDOW: usize = 32;

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Overall deadline for one lookup, retries and backoff included.
    /// Expiry aborts outstanding retries and surfaces a timeout reply.
    pub lookup_deadline: Duration,
    /// Capacity of the recent-failure window.
    pub failure_window: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            lookup_deadline: DEFAULT_LOOKUP_DEADLINE,
            failure_window: DEFAULT_FAILURE_WINDOW,
        }
    }
}

/// The outcome of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// User-facing reply text.
    pub reply: String,
    /// Conversation state the caller should store for this user.
    pub next_state: ConversationState,
}

/// Composes the pipeline components over an [`OrderLookup`] seam.
///
/// Explicitly constructed and passed around; there is no ambient
/// singleton. The cache is shared (`Arc`) so the transport layer can reach
/// its administrative surface through the same instance.
pub struct Dispatcher<L> {
    lookup: Arc<L>,
    cache: Arc<LookupCache>,
    terms: ProhibitedTermSet,
    config: DispatcherConfig,
    failures: FailureWindow,
}

impl<L: OrderLookup> Dispatcher<L> {
    /// Create a dispatcher.
    pub fn new(
        lookup: Arc<L>,
        cache: Arc<LookupCache>,
        terms: ProhibitedTermSet,
        config: DispatcherConfig,
    ) -> Self {
        let failures = FailureWindow::new(config.failure_window);
        Self {
            lookup,
            cache,
            terms,
            config,
            failures,
        }
    }

    /// Handle one inbound message and produce the reply plus next state.
    ///
    /// Pipeline order is contractual: sanitize → content filter → intent
    /// classification → lookup → composition. The filter runs before any
    /// command or format matching. Every failure resolves to a reply
    /// string; nothing here is fatal.
    pub async fn handle(
        &self,
        user: &UserIdentity,
        raw_text: &str,
        state: ConversationState,
    ) -> Outcome {
        let text = sanitize(raw_text);

        if self.terms.is_prohibited(&text.normalized) {
            info!(user = %user, "prohibited language detected");
            return Outcome {
                reply: compose::profanity_warning().to_string(),
                next_state: state,
            };
        }

        match classify(&text, state) {
            Intent::Greeting => Outcome {
                reply: compose::greeting().to_string(),
                next_state: ConversationState::AwaitingCommand,
            },
            Intent::HelpRequest => Outcome {
                reply: compose::help().to_string(),
                next_state: state,
            },
            Intent::MenuSelectLookup => Outcome {
                reply: compose::prompt_for_code().to_string(),
                next_state: ConversationState::AwaitingCode,
            },
            Intent::TrackingCodeSubmission(code) => {
                debug!(user = %user, code = %code, "tracking code submitted");
                let reply = self.lookup_reply(user, &code).await;
                Outcome {
                    reply,
                    next_state: ConversationState::Idle,
                }
            }
            Intent::Unrecognized => {
                let reply = if state == ConversationState::AwaitingCode {
                    compose::retry_code_prompt()
                } else {
                    compose::unrecognized()
                };
                Outcome {
                    reply: reply.to_string(),
                    next_state: ConversationState::Idle,
                }
            }
        }
    }

    /// Pure predicate for other entry points: would this text trip the
    /// content filter after sanitation?
    pub fn content_flagged(&self, raw: &str) -> bool {
        self.terms.is_prohibited(&sanitize(raw).normalized)
    }

    /// Resolve a code through the cache under the overall deadline.
    ///
    /// Deadline expiry drops the in-flight fetch, retries included, and
    /// surfaces as [`LookupError::Timeout`]. Failures are recorded in the
    /// recent-failure window.
    pub async fn lookup(
        &self,
        user: &UserIdentity,
        code: &TrackingCode,
    ) -> Result<OrderStatusResult, LookupError> {
        let key = cache_key(user, code);

        let result = timeout(
            self.config.lookup_deadline,
            self.cache
                .get_or_fetch(&key, || self.lookup.fetch_status(code)),
        )
        .await
        .unwrap_or(Err(LookupError::Timeout));

        if let Err(err) = &result {
            warn!(user = %user, code = %code, error = %err, "lookup failed");
            self.failures.record(&key, err);
        }
        result
    }

    /// Resolve a code and compose the reply.
    async fn lookup_reply(&self, user: &UserIdentity, code: &TrackingCode) -> String {
        match self.lookup(user, code).await {
            Ok(status) => {
                debug!(user = %user, code = %code, status = ?status.status, "lookup resolved");
                compose::order_status(&status)
            }
            Err(err) => compose::lookup_failure(user, code, &err),
        }
    }

    /// Clear all cached lookups.
    ///
    /// Credential checks live in the transport layer; by the time this is
    /// called the caller is already authorized.
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all().await;
    }

    /// Current cache entry count, for the health endpoint.
    pub async fn cache_size(&self) -> usize {
        self.cache.len().await
    }

    /// Number of retained recent failures.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Snapshot of retained recent failures, oldest first.
    pub fn recent_failures(&self) -> Vec<FailureRecord> {
        self.failures.recent()
    }
}
