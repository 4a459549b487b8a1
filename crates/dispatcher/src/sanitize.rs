//! Inbound text sanitation.

/// Sanitized inbound text.
///
/// `display` keeps the original casing for code extraction and replies;
/// `normalized` is the lowercased form used for keyword and filter
/// matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub display: String,
    pub normalized: String,
}

impl Sanitized {
    /// Whether nothing usable remained after sanitation.
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

/// Normalize raw inbound text.
///
/// Drops control characters, collapses whitespace runs to single spaces,
/// and trims the ends. Never fails; empty input yields empty output, and
/// the function is idempotent on its own `display` output.
pub fn sanitize(raw: &str) -> Sanitized {
    let mut display = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = !display.is_empty();
        } else if c.is_control() {
            // Dropped entirely; these never carry user intent.
        } else {
            if pending_space {
                display.push(' ');
                pending_space = false;
            }
            display.push(c);
        }
    }

    let normalized = display.to_lowercase();
    Sanitized { display, normalized }
}
