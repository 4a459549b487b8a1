//! Intent classification for sanitized, filter-cleared text.

use std::sync::LazyLock;

use regex::Regex;

use order_core::TrackingCode;

use crate::sanitize::Sanitized;
use crate::session::ConversationState;

/// Classified purpose of an inbound message. Exactly one per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    MenuSelectLookup,
    HelpRequest,
    TrackingCodeSubmission(TrackingCode),
    Unrecognized,
}

static HELP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ayuda|help|comandos)$").expect("invalid help regex"));

static GREETING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(hola|inicio|buenas|hello)$").expect("invalid greeting regex"));

/// Menu option that starts a lookup.
const MENU_LOOKUP_TOKEN: &str = "1";

/// Map sanitized text to an [`Intent`].
///
/// Precedence: exact keyword match (help, greeting, menu token), then
/// tracking-code format validation, then [`Intent::Unrecognized`]. While a
/// code is awaited the menu token is not re-interpreted as a menu
/// selection; the expected input there is a code. Codes failing the strict
/// format never become submissions, so invalid keys never reach the
/// upstream client.
pub fn classify(text: &Sanitized, state: ConversationState) -> Intent {
    let normalized = text.normalized.as_str();

    if HELP_RE.is_match(normalized) {
        return Intent::HelpRequest;
    }
    if GREETING_RE.is_match(normalized) {
        return Intent::Greeting;
    }
    if state != ConversationState::AwaitingCode && normalized == MENU_LOOKUP_TOKEN {
        return Intent::MenuSelectLookup;
    }

    match TrackingCode::parse(&text.display) {
        Ok(code) => Intent::TrackingCodeSubmission(code),
        Err(_) => Intent::Unrecognized,
    }
}
