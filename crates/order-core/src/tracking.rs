//! Tracking-code validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted length of a tracking code, dash included.
pub const MAX_CODE_LEN: usize = 12;

/// Reasons a raw token is not a valid tracking code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeFormatError {
    /// The input was empty after trimming.
    #[error("tracking code is empty")]
    Empty,

    /// The input exceeds [`MAX_CODE_LEN`].
    #[error("tracking code is too long ({0} chars)")]
    TooLong(usize),

    /// The input does not match the accepted pattern.
    #[error("tracking code has an invalid format")]
    InvalidFormat,
}

/// A validated order tracking code.
///
/// Accepted shape: 2-5 ASCII letters, an optional single dash, then 1-8
/// digits (`ABC123`, `PED-123`, `ORD-456`). Codes are stored uppercased so
/// equal codes always derive equal cache keys regardless of input casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingCode(String);

impl TrackingCode {
    /// Validate a raw token and canonicalize it.
    ///
    /// Callers must pass sanitized text; this only enforces the code format.
    pub fn parse(input: &str) -> Result<Self, CodeFormatError> {
        let token = input.trim();
        if token.is_empty() {
            return Err(CodeFormatError::Empty);
        }
        if token.chars().count() > MAX_CODE_LEN {
            return Err(CodeFormatError::TooLong(token.chars().count()));
        }

        let letters: String = token
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if !(2..=5).contains(&letters.len()) {
            return Err(CodeFormatError::InvalidFormat);
        }

        let rest = &token[letters.len()..];
        let digits = rest.strip_prefix('-').unwrap_or(rest);
        if digits.is_empty()
            || digits.len() > 8
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(CodeFormatError::InvalidFormat);
        }

        Ok(Self(token.to_ascii_uppercase()))
    }

    /// The canonical (uppercased) code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
