//! Conversation-level state.

/// What the bot expects next from a given user.
///
/// The state itself lives in the transport layer's session store; the
/// dispatcher only consumes the current value and returns the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// Fresh conversation; a command or menu selection is expected.
    #[default]
    AwaitingCommand,
    /// The user selected the lookup option; a tracking code is expected.
    AwaitingCode,
    /// No pending prompt.
    Idle,
}
