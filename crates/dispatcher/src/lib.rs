//! Conversation pipeline for the order-tracking bot.
//!
//! The [`Dispatcher`] composes the leaf components in a fixed, contractual
//! order: sanitize → content filter → intent classification → cached
//! lookup → reply composition. The filter runs strictly before command and
//! format matching, so a prohibited term embedded in an otherwise valid
//! tracking code still takes the warning path.
//!
//! Per-user conversation state ([`ConversationState`]) is owned by the
//! caller (the transport layer's session store); the dispatcher takes the
//! current state in and hands the next state back.

pub mod compose;
mod dispatch;
mod filter;
mod intent;
mod metrics;
mod sanitize;
mod session;

pub use dispatch::{Dispatcher, DispatcherConfig, Outcome};
pub use filter::ProhibitedTermSet;
pub use intent::{classify, Intent};
pub use metrics::{FailureRecord, FailureWindow};
pub use sanitize::{sanitize, Sanitized};
pub use session::ConversationState;
