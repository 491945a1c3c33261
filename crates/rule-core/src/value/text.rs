//! String predicate primitives: substring, prefix, suffix, with
//! case-sensitive and case-insensitive variants.

use super::Value;

impl Value {
    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Substring test. Fails (returns `false`) when either side is not
    /// string-shaped rather than coercing non-strings.
    #[must_use]
    pub fn string_contains(&self, needle: &Self) -> bool {
        match (self.as_text(), needle.as_text()) {
            (Some(haystack), Some(needle)) => haystack.contains(needle),
            _ => false,
        }
    }

    #[must_use]
    pub fn string_contains_insensitive(&self, needle: &Self) -> bool {
        match (self.as_text(), needle.as_text()) {
            (Some(haystack), Some(needle)) => casefold(haystack).contains(&casefold(needle)),
            _ => false,
        }
    }

    /// Empty haystack and non-empty needle ⇒ false; empty needle always
    /// matches a non-empty prefix position (standard `str::starts_with`
    /// semantics), matching §4.1's edge case list.
    #[must_use]
    pub fn starts_with(&self, other: &Self, insensitive: bool) -> bool {
        match (self.as_text(), other.as_text()) {
            (Some(haystack), Some(needle)) => {
                if insensitive {
                    casefold(haystack).starts_with(&casefold(needle))
                } else {
                    haystack.starts_with(needle)
                }
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn ends_with(&self, other: &Self, insensitive: bool) -> bool {
        match (self.as_text(), other.as_text()) {
            (Some(haystack), Some(needle)) => {
                if insensitive {
                    casefold(haystack).ends_with(&casefold(needle))
                } else {
                    haystack.ends_with(needle)
                }
            }
            _ => false,
        }
    }
}

fn casefold(input: &str) -> String {
    if input.is_ascii() {
        input.to_ascii_lowercase()
    } else {
        input.to_lowercase()
    }
}
