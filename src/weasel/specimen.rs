//! The candidate string evolved by the engine.

use std::fmt;

/// One candidate string in the population.
///
/// A specimen is an immutable value: mutation operators build a new
/// specimen instead of editing one in place. Its length may differ from
/// the target's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Specimen {
    chars: Vec<char>,
}

impl Specimen {
    /// Creates a specimen from its characters.
    pub fn from_chars(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// The characters of this specimen.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the specimen has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Splits on single spaces, keeping empty words.
    ///
    /// Joining the result with `' '` gives back the specimen, so an empty
    /// specimen has one (empty) word.
    pub fn words(&self) -> Vec<&[char]> {
        self.chars.split(|&c| c == ' ').collect()
    }

    /// Rebuilds a specimen from words, joined with single spaces.
    pub fn from_words<W: AsRef<[char]>>(words: &[W]) -> Self {
        let mut chars = Vec::new();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                chars.push(' ');
            }
            chars.extend_from_slice(word.as_ref());
        }
        Self { chars }
    }
}

impl From<&str> for Specimen {
    fn from(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }
}

impl From<String> for Specimen {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Specimen> for String {
    fn from(specimen: Specimen) -> Self {
        specimen.chars.into_iter().collect()
    }
}

impl fmt::Display for Specimen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl PartialEq<str> for Specimen {
    fn eq(&self, other: &str) -> bool {
        self.chars.iter().copied().eq(other.chars())
    }
}

impl PartialEq<&str> for Specimen {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
