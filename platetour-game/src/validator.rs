//! Word acceptance against the current plate.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::constants::MIN_WORD_CHARS;

/// Consonant data as it arrives at the validation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsonantInput {
    /// A native sequence of characters.
    Chars(Vec<char>),
    /// A string holding a JSON array such as `["B","C","D"]`.
    Encoded(String),
    /// A bare string taken as one literal consonant token.
    Token(String),
}

impl From<&[char]> for ConsonantInput {
    fn from(chars: &[char]) -> Self {
        Self::Chars(chars.to_vec())
    }
}

impl<const N: usize> From<&[char; N]> for ConsonantInput {
    fn from(chars: &[char; N]) -> Self {
        Self::Chars(chars.to_vec())
    }
}

impl From<&str> for ConsonantInput {
    fn from(raw: &str) -> Self {
        if raw.trim_start().starts_with('[') {
            Self::Encoded(raw.to_string())
        } else {
            Self::Token(raw.to_string())
        }
    }
}

/// Canonical uppercase consonant tokens, resolved once per validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsonantSet {
    tokens: SmallVec<[String; 3]>,
}

impl ConsonantSet {
    /// Resolve any accepted input shape. Malformed input yields an empty set.
    #[must_use]
    pub fn resolve(input: &ConsonantInput) -> Self {
        let mut set = Self::default();
        match input {
            ConsonantInput::Chars(chars) => {
                for c in chars {
                    set.insert(&c.to_string());
                }
            }
            ConsonantInput::Encoded(raw) => {
                if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
                    for item in items {
                        if let Value::String(token) = item {
                            set.insert(&token);
                        }
                    }
                }
            }
            ConsonantInput::Token(token) => set.insert(token),
        }
        set
    }

    fn insert(&mut self, token: &str) {
        let token = token.trim().to_uppercase();
        if token.is_empty() || self.tokens.contains(&token) {
            return;
        }
        self.tokens.push(token);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the uppercased word contains any token.
    fn matches(&self, upper_word: &str) -> bool {
        self.tokens.iter().any(|t| upper_word.contains(t.as_str()))
    }
}

/// Why a word was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    Empty,
    TooShort,
    NoPlateConsonant,
}

impl Rejection {
    /// Translation key for the user-facing message.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Empty => "word.rejected.empty",
            Self::TooShort => "word.rejected.too-short",
            Self::NoPlateConsonant => "word.rejected.no-consonant",
        }
    }
}

/// Check a word against a resolved consonant set.
///
/// # Errors
///
/// Returns the reason the word is not acceptable.
pub fn check(word: &str, consonants: &ConsonantSet) -> Result<(), Rejection> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err(Rejection::Empty);
    }
    if trimmed.chars().count() < MIN_WORD_CHARS {
        return Err(Rejection::TooShort);
    }
    if consonants.matches(&trimmed.to_uppercase()) {
        Ok(())
    } else {
        Err(Rejection::NoPlateConsonant)
    }
}

/// Decide whether `word` is acceptable for the plate consonants.
#[must_use]
pub fn is_valid(word: &str, consonants: impl Into<ConsonantInput>) -> bool {
    check(word, &ConsonantSet::resolve(&consonants.into())).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_word_with_plate_consonant() {
        assert!(is_valid("CASA", &['S', 'R', 'T']));
        assert!(is_valid("casa", &['s', 'r', 't']));
    }

    #[test]
    fn rejects_short_and_empty_words() {
        assert!(!is_valid("EA", &['S']));
        assert!(!is_valid("", &['S']));
        assert!(!is_valid("  sa  ", &['S']));
        let set = ConsonantSet::resolve(&ConsonantInput::from(&['S']));
        assert_eq!(check("   ", &set), Err(Rejection::Empty));
        assert_eq!(check("as", &set), Err(Rejection::TooShort));
    }

    #[test]
    fn rejects_word_without_plate_consonant() {
        let set = ConsonantSet::resolve(&ConsonantInput::from(&['B', 'D', 'F']));
        assert_eq!(check("CASA", &set), Err(Rejection::NoPlateConsonant));
    }

    #[test]
    fn diacritics_are_kept_when_uppercasing() {
        assert!(is_valid("niño", "[\"Ñ\"]"));
        assert!(is_valid("árbol", &['B']));
    }

    #[test]
    fn encoded_string_is_decoded() {
        assert!(is_valid("PERRO", r#"["Z","R","Q"]"#));
        assert!(!is_valid("PERRO", r#"["Z","Q"]"#));
    }

    #[test]
    fn bare_string_is_one_token() {
        assert!(is_valid("mesa", "s"));
        assert!(!is_valid("mesa", "BCD"));
    }

    #[test]
    fn malformed_input_degrades_to_no_consonants() {
        let set = ConsonantSet::resolve(&ConsonantInput::from("[\"S\","));
        assert!(set.is_empty());
        assert!(!is_valid("CASA", "[\"S\","));
        assert!(!is_valid("CASA", "{\"S\": 1}"));
        assert!(!is_valid("CASA", ""));
    }

    #[test]
    fn non_string_json_members_are_ignored() {
        let set = ConsonantSet::resolve(&ConsonantInput::from(r#"[1, null, "s", "S"]"#));
        assert_eq!(set.len(), 1);
    }
}
