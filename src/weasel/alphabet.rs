//! Character pool for random specimens and mutations.

use crate::random::roll;
use rand::Rng;

/// Characters used when no alphabet is configured.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 '.,!?;:()";

/// An ordered pool of characters.
///
/// Duplicates are allowed: a character listed twice is drawn twice as
/// often. An empty alphabet is rejected by
/// [`WeaselConfig::validate`](super::WeaselConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the characters of `s`, in order.
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
        }
    }

    /// The characters of this alphabet.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns `true` if the alphabet has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Draws one character with [`roll`].
    ///
    /// Falls back to a space for an empty alphabet, which a validated
    /// configuration never has.
    pub fn random_char<R: Rng>(&self, rng: &mut R) -> char {
        roll(&self.chars, rng).copied().unwrap_or(' ')
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

impl From<&str> for Alphabet {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Alphabet {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.chars.into_iter().collect()
    }
}

/// Shifts `c` one code point up or down, each with probability one half.
///
/// There is no wrapping and no printability check, so control characters
/// can come out. A neighbour that is not a Unicode scalar value (below
/// U+0000 or inside the surrogate range) leaves `c` unchanged.
pub fn randomize_char<R: Rng>(c: char, rng: &mut R) -> char {
    let step = roll(&[1i64, -1], rng).copied().unwrap_or(1);
    u32::try_from(i64::from(u32::from(c)) + step)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_char_in_alphabet() {
        let alphabet = Alphabet::new("ABCT ");
        let mut rng = create_rng(42);
        for _ in 0..500 {
            assert!(alphabet.chars().contains(&alphabet.random_char(&mut rng)));
        }
    }

    #[test]
    fn test_duplicates_weight_the_draw() {
        let alphabet = Alphabet::new("AAAB");
        let mut rng = create_rng(42);
        let a = (0..10_000)
            .filter(|_| alphabet.random_char(&mut rng) == 'A')
            .count();
        assert!(a > 7_000, "'A' listed three times should dominate, got {a}");
    }

    #[test]
    fn test_randomize_char_neighbours() {
        let mut rng = create_rng(42);
        let mut seen_up = false;
        let mut seen_down = false;
        for _ in 0..200 {
            match randomize_char('M', &mut rng) {
                'N' => seen_up = true,
                'L' => seen_down = true,
                other => panic!("unexpected neighbour {other:?}"),
            }
        }
        assert!(seen_up && seen_down);
    }

    #[test]
    fn test_randomize_char_edges_are_total() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let c = randomize_char('\0', &mut rng);
            assert!(c == '\0' || c == '\u{1}');
            let c = randomize_char('\u{D7FF}', &mut rng);
            assert!(c == '\u{D7FF}' || c == '\u{D7FE}');
        }
    }

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert!(!alphabet.is_empty());
        assert!(alphabet.chars().contains(&' '));
        assert!(alphabet.chars().contains(&'3'));
    }
}
