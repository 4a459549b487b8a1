//! Channel user identity and cache-key derivation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tracking::TrackingCode;

/// Errors validating a channel identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The identifier is not a plausible phone number.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
}

/// Opaque channel-specific user identifier.
///
/// For the WhatsApp channel this is a phone number with optional `+`
/// prefix and 10-15 digits. The value is kept verbatim once validated;
/// the bot never owns channel session state beyond using this as a
/// namespace for cache keys and conversation context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    /// Validate a raw channel identifier.
    pub fn parse(input: &str) -> Result<Self, IdentityError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(IdentityError::InvalidPhone(trimmed.to_string()))
        }
    }

    /// The validated identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical cache-key derivation: user-scoped, `"{user}:{CODE}"`.
///
/// This is the single derivation used everywhere; codes are already
/// uppercased by [`TrackingCode::parse`], so repeated lookups of the same
/// code by the same user always hit the same slot.
pub fn cache_key(user: &UserIdentity, code: &TrackingCode) -> String {
    format!("{}:{}", user.as_str(), code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_phone_numbers() {
        assert!(UserIdentity::parse("1234567890").is_ok());
        assert!(UserIdentity::parse("+5215512345678").is_ok());
        assert_eq!(
            UserIdentity::parse(" +5215512345678 ").unwrap().as_str(),
            "+5215512345678"
        );
    }

    #[test]
    fn rejects_bad_phones() {
        assert!(UserIdentity::parse("12345").is_err());
        assert!(UserIdentity::parse("12345678901234567").is_err());
        assert!(UserIdentity::parse("555-123-4567").is_err());
        assert!(UserIdentity::parse("").is_err());
    }

    #[test]
    fn cache_key_is_stable_across_input_casing() {
        let user = UserIdentity::parse("1234567890").unwrap();
        let a = cache_key(&user, &TrackingCode::parse("ped-123").unwrap());
        let b = cache_key(&user, &TrackingCode::parse("PED-123").unwrap());
        assert_eq!(a, b);
        assert_eq!(a, "1234567890:PED-123");
    }
}
