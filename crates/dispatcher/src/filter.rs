//! Prohibited-language filter.

use tracing::debug;

/// Default prohibited terms (normalized, Spanish).
const DEFAULT_TERMS: &[&str] = &[
    "estupido",
    "idiota",
    "imbecil",
    "tonto",
    "pendejo",
    "pendeja",
    "hijo de puta",
    "hija de puta",
    "puta",
    "cabrón",
    "cabrona",
];

/// Immutable set of prohibited terms, loaded once at process start.
///
/// Matching is substring containment over the sanitized, lowercased text:
/// exact tokens, compound (multi-word) terms, and terms embedded inside an
/// otherwise valid tracking code all trip the filter.
#[derive(Debug, Clone)]
pub struct ProhibitedTermSet {
    terms: Vec<String>,
}

impl ProhibitedTermSet {
    /// Build a set from arbitrary terms; terms are lowercased, empty ones
    /// are dropped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.into().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        debug!(count = terms.len(), "loaded prohibited-term set");
        Self { terms }
    }

    /// Number of loaded terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the set is empty (filtering disabled).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Pure predicate: does the normalized text contain a prohibited term?
    pub fn is_prohibited(&self, normalized: &str) -> bool {
        self.terms.iter().any(|term| normalized.contains(term.as_str()))
    }
}

impl Default for ProhibitedTermSet {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize;

    #[test]
    fn clean_text_passes() {
        let set = ProhibitedTermSet::default();
        assert!(!set.is_prohibited("hola"));
        assert!(!set.is_prohibited("ped-123"));
        assert!(!set.is_prohibited(""));
    }

    #[test]
    fn exact_tokens_trip() {
        let set = ProhibitedTermSet::default();
        assert!(set.is_prohibited(sanitize("eres un ESTUPIDO bot").normalized.as_str()));
        assert!(set.is_prohibited("idiota"));
    }

    #[test]
    fn compound_terms_trip() {
        let set = ProhibitedTermSet::default();
        assert!(set.is_prohibited(sanitize("Hijo  de  Puta").normalized.as_str()));
    }

    #[test]
    fn terms_embedded_in_code_shapes_trip() {
        let set = ProhibitedTermSet::default();
        // A valid-looking tracking code that still contains a listed term.
        assert!(set.is_prohibited(sanitize("PUTA-123").normalized.as_str()));
    }

    #[test]
    fn accented_terms_trip() {
        let set = ProhibitedTermSet::default();
        assert!(set.is_prohibited(sanitize("CABRÓN").normalized.as_str()));
    }

    #[test]
    fn custom_sets_are_normalized() {
        let set = ProhibitedTermSet::new(["  Malo ", ""]);
        assert_eq!(set.len(), 1);
        assert!(set.is_prohibited("muy malo"));
    }
}
