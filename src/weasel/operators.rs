//! Mutation operators for specimens.
//!
//! Every operator takes a specimen by reference and returns a new one;
//! the input is never touched. Operators that pick a position use the
//! biased [`random_index`].
//!
//! # Operators
//!
//! - [`Mutation::Replace`]: fresh alphabet character at one position
//! - [`Mutation::Delete`]: drop one character
//! - [`Mutation::Duplicate`]: double one character in place
//! - [`Mutation::Randomize`]: shift one character by one code point
//! - [`Mutation::RandomizeMulti`]: shift most characters by one code point
//! - [`Mutation::SwapChars`]: swap two adjacent characters
//! - [`Mutation::SwapWords`]: swap two adjacent space-separated words
//!
//! Which operator runs for a clone is decided by a [`MutationPolicy`].

use super::alphabet::{randomize_char, Alphabet};
use super::specimen::Specimen;
use crate::random::{random_index, roll};
use rand::Rng;

/// Probability that [`Mutation::RandomizeMulti`] shifts a given character.
const MULTI_SHIFT_PROBABILITY: f64 = 0.9;

/// A single-specimen transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Replace the character at a random index with a random alphabet
    /// character. Preserves length.
    Replace,
    /// Remove the character at a random index. Shortens by one.
    Delete,
    /// Duplicate the character at a random index in place. Lengthens by one.
    Duplicate,
    /// Shift the character at a random index by ±1 code point.
    Randomize,
    /// Shift each character by ±1 code point with probability 0.9.
    RandomizeMulti,
    /// Swap a random character with its successor (or predecessor at the
    /// last index).
    SwapChars,
    /// Swap a random word with its successor (or predecessor at the last
    /// word). Words are separated by single spaces.
    SwapWords,
}

impl Mutation {
    /// Every operator, in declaration order.
    pub const ALL: [Mutation; 7] = [
        Mutation::Replace,
        Mutation::Delete,
        Mutation::Duplicate,
        Mutation::Randomize,
        Mutation::RandomizeMulti,
        Mutation::SwapChars,
        Mutation::SwapWords,
    ];

    /// Applies this operator to `specimen`, returning the mutated copy.
    ///
    /// An empty specimen comes back unchanged.
    pub fn apply<R: Rng>(&self, specimen: &Specimen, alphabet: &Alphabet, rng: &mut R) -> Specimen {
        if specimen.is_empty() {
            return specimen.clone();
        }
        let chars = specimen.chars();
        match self {
            Mutation::Replace => {
                let idx = random_index(chars.len(), rng);
                let mut out = chars.to_vec();
                out[idx] = alphabet.random_char(rng);
                Specimen::from_chars(out)
            }
            Mutation::Delete => {
                let idx = random_index(chars.len(), rng);
                let mut out = chars.to_vec();
                out.remove(idx);
                Specimen::from_chars(out)
            }
            Mutation::Duplicate => {
                let idx = random_index(chars.len(), rng);
                let mut out = chars.to_vec();
                out.insert(idx, chars[idx]);
                Specimen::from_chars(out)
            }
            Mutation::Randomize => {
                let idx = random_index(chars.len(), rng);
                let mut out = chars.to_vec();
                out[idx] = randomize_char(chars[idx], rng);
                Specimen::from_chars(out)
            }
            Mutation::RandomizeMulti => Specimen::from_chars(
                chars
                    .iter()
                    .map(|&c| {
                        if rng.random::<f64>() < MULTI_SHIFT_PROBABILITY {
                            randomize_char(c, rng)
                        } else {
                            c
                        }
                    })
                    .collect(),
            ),
            Mutation::SwapChars => {
                let mut out = chars.to_vec();
                let idx = random_index(out.len(), rng);
                swap_adjacent(&mut out, idx);
                Specimen::from_chars(out)
            }
            Mutation::SwapWords => {
                let mut words = specimen.words();
                let idx = random_index(words.len(), rng);
                swap_adjacent(&mut words, idx);
                Specimen::from_words(&words)
            }
        }
    }
}

/// Swaps `items[index]` with its successor, or with its predecessor when
/// `index` is the last position. Sequences shorter than two are left alone.
fn swap_adjacent<T>(items: &mut [T], index: usize) {
    let n = items.len();
    if n < 2 {
        return;
    }
    let index = index.min(n - 1);
    if index + 1 < n {
        items.swap(index, index + 1);
    } else {
        items.swap(index, index - 1);
    }
}

/// Chooses which [`Mutation`] is applied to a clone.
///
/// The operators themselves stay untouched when the policy changes.
///
/// # Examples
///
/// ```
/// use u_weasel::weasel::{Mutation, MutationPolicy};
///
/// // Default: always replace one character
/// assert_eq!(MutationPolicy::default(), MutationPolicy::Fixed(Mutation::Replace));
///
/// // Roll among several operators per clone
/// let policy = MutationPolicy::Roll(vec![Mutation::Replace, Mutation::SwapChars]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationPolicy {
    /// Always apply the same operator.
    Fixed(Mutation),
    /// Roll one operator per clone with [`roll`].
    ///
    /// Must not be empty.
    Roll(Vec<Mutation>),
}

impl Default for MutationPolicy {
    fn default() -> Self {
        MutationPolicy::Fixed(Mutation::Replace)
    }
}

impl MutationPolicy {
    /// Returns `true` if the policy has at least one operator to run.
    pub fn is_usable(&self) -> bool {
        match self {
            MutationPolicy::Fixed(_) => true,
            MutationPolicy::Roll(ops) => !ops.is_empty(),
        }
    }

    /// Picks an operator and applies it to `specimen`.
    ///
    /// An empty `Roll` policy returns an unmutated copy.
    pub fn mutate<R: Rng>(&self, specimen: &Specimen, alphabet: &Alphabet, rng: &mut R) -> Specimen {
        let op = match self {
            MutationPolicy::Fixed(op) => Some(op),
            MutationPolicy::Roll(ops) => roll(ops, rng),
        };
        match op {
            Some(op) => op.apply(specimen, alphabet, rng),
            None => specimen.clone(),
        }
    }
}
