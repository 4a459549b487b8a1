//! In-memory per-user conversation sessions.

use std::collections::HashMap;
use std::sync::Arc;

use dispatcher::ConversationState;
use order_core::UserIdentity;
use tokio::sync::RwLock;

/// Volatile, process-lifetime store of conversation state per user.
///
/// The dispatcher itself is stateless; this is the collaborator that owns
/// "what does the bot expect next" for each user.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, ConversationState>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a user; new users start awaiting a command.
    pub async fn current(&self, user: &UserIdentity) -> ConversationState {
        self.inner
            .read()
            .await
            .get(user.as_str())
            .copied()
            .unwrap_or_default()
    }

    /// Store the next state for a user.
    pub async fn store(&self, user: &UserIdentity, state: ConversationState) {
        self.inner
            .write()
            .await
            .insert(user.as_str().to_string(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_users_await_a_command() {
        let store = SessionStore::new();
        let user = UserIdentity::parse("1234567890").unwrap();
        assert_eq!(store.current(&user).await, ConversationState::AwaitingCommand);
    }

    #[tokio::test]
    async fn stores_per_user() {
        let store = SessionStore::new();
        let a = UserIdentity::parse("1234567890").unwrap();
        let b = UserIdentity::parse("0987654321").unwrap();

        store.store(&a, ConversationState::AwaitingCode).await;

        assert_eq!(store.current(&a).await, ConversationState::AwaitingCode);
        assert_eq!(store.current(&b).await, ConversationState::AwaitingCommand);
    }
}
