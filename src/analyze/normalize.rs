//! @acp:module "Lexical Normalizer"
//! @acp:summary "Lower-case, character-restrict, and whitespace-collapse raw prompt text"
//! @acp:domain analysis
//! @acp:layer logic

use serde::Serialize;

/// @acp:summary "Prompt text in its canonical matching form"
///
/// Contains only `[a-z0-9 \-.@]`, single spaces, no leading or trailing space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// @acp:summary "Normalize arbitrary input; total over every string"
    pub fn new(raw: &str) -> Self {
        let restricted: String = raw
            .to_lowercase()
            .chars()
            .map(|c| if is_allowed(c) { c } else { ' ' })
            .collect();

        Self(restricted.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Literal substring test
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    /// True if any needle occurs as a substring
    pub fn contains_any<S: AsRef<str>>(&self, needles: &[S]) -> bool {
        needles.iter().any(|n| self.0.contains(n.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_allowed(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | ' ' | '-' | '.' | '@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apostrophes_become_spaces() {
        let n = NormalizedText::new("Create an extension that shows a popup with today's date.");
        assert_eq!(
            n.as_str(),
            "create an extension that shows a popup with today s date."
        );
    }

    #[test]
    fn test_punctuation_does_not_leave_double_spaces() {
        let n = NormalizedText::new("Block Facebook,  Twitter,\tand Instagram!!");
        assert_eq!(n.as_str(), "block facebook twitter and instagram");
    }

    #[test]
    fn test_keeps_hyphen_period_at() {
        let n = NormalizedText::new("Real-Time alerts for me@example.com");
        assert_eq!(n.as_str(), "real-time alerts for me@example.com");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        let n = NormalizedText::new("  Café — naïve\u{00A0}résumé ");
        assert!(n.as_str().chars().all(is_allowed));
        assert!(!n.as_str().contains("  "));
        assert!(!n.as_str().starts_with(' ') && !n.as_str().ends_with(' '));
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert!(NormalizedText::new("").is_empty());
        assert!(NormalizedText::new("!!! ??? ###").is_empty());
    }
}
