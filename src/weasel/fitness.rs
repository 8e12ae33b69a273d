//! Fitness evaluators comparing a specimen against the target.
//!
//! Every evaluator returns `1.0` for an exact match and strictly less as
//! the mismatch grows. Scores are unbounded below.
//!
//! The word-aware [`Evaluator::Complicated`] is a coarse structural proxy,
//! not an edit distance: each word contributes a cheap signature plus a
//! `10000 * word_index` offset, so the word count dominates the score
//! while whole words trading places go unnoticed.

use super::specimen::Specimen;

/// Positional offset added per word by [`specimen_signature`].
const WORD_OFFSET: i64 = 10_000;

/// Character used to pad the shorter string in per-position comparisons.
const PAD: char = ' ';

/// Scoring function for specimens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Evaluator {
    /// `1 - |len diff| - mismatched positions`.
    #[default]
    Discrete,
    /// `1 - |len diff| - Σ |code point diff|`.
    Continuous,
    /// `1 - |len diff| - 4·|word count diff| - 2·|signature diff|`.
    Complicated,
}

impl Evaluator {
    /// Every evaluator, in declaration order.
    pub const ALL: [Evaluator; 3] = [
        Evaluator::Discrete,
        Evaluator::Continuous,
        Evaluator::Complicated,
    ];

    /// Scores `specimen` against `target`.
    pub fn evaluate(&self, specimen: &Specimen, target: &Specimen) -> f64 {
        match self {
            Evaluator::Discrete => discrete_fitness(specimen.chars(), target.chars()),
            Evaluator::Continuous => continuous_fitness(specimen.chars(), target.chars()),
            Evaluator::Complicated => complicated_fitness(specimen, target),
        }
    }
}

fn code(c: char) -> i64 {
    i64::from(u32::from(c))
}

fn length_difference(a: &[char], b: &[char]) -> i64 {
    (a.len() as i64 - b.len() as i64).abs()
}

/// Sums `penalty` over every position of the longer string, padding the
/// shorter one with spaces.
fn padded_penalty(a: &[char], b: &[char], penalty: impl Fn(char, char) -> i64) -> i64 {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    long.iter()
        .enumerate()
        .map(|(i, &c)| penalty(c, short.get(i).copied().unwrap_or(PAD)))
        .sum()
}

/// Discrete fitness: each differing position costs one.
pub fn discrete_fitness(specimen: &[char], target: &[char]) -> f64 {
    let content = padded_penalty(specimen, target, |a, b| i64::from(a != b));
    (1 - length_difference(specimen, target) - content) as f64
}

/// Continuous fitness: each position costs its code point distance.
pub fn continuous_fitness(specimen: &[char], target: &[char]) -> f64 {
    let content = padded_penalty(specimen, target, |a, b| (code(a) - code(b)).abs());
    (1 - length_difference(specimen, target) - content) as f64
}

/// Word-aware fitness built from word counts and signatures.
pub fn complicated_fitness(specimen: &Specimen, target: &Specimen) -> f64 {
    let length = length_difference(specimen.chars(), target.chars());
    let word_count = (specimen.words().len() as i64 - target.words().len() as i64).abs();
    let content = (specimen_signature(specimen) - specimen_signature(target)).abs();
    (1 - length - word_count * 4 - content * 2) as f64
}

/// Content checksum: `Σ code(c_i) + 3·i`.
pub fn checksum(word: &[char]) -> i64 {
    word.iter()
        .enumerate()
        .map(|(i, &c)| code(c) + i as i64 * 3)
        .sum()
}

/// Structural hash of one word; `0` for the empty word.
pub fn signature(word: &[char]) -> i64 {
    match (word.first(), word.last()) {
        (Some(&first), Some(&last)) => {
            checksum(word) * 2 + word.len() as i64 + code(first) * 3 + code(last) * 3
        }
        _ => 0,
    }
}

/// Sum of word signatures, each offset by `10000 * word_index`.
pub fn specimen_signature(specimen: &Specimen) -> i64 {
    specimen
        .words()
        .iter()
        .enumerate()
        .map(|(i, word)| signature(word) + i as i64 * WORD_OFFSET)
        .sum()
}

/// Scores one word against a target word.
///
/// Key points are the first and last characters: both matching costs
/// nothing, one matching costs 2, neither costs 7, and the key-point cost
/// is weighted by 40.
pub fn word_fitness(word: &[char], target_word: &[char]) -> f64 {
    let first = word.first() == target_word.first();
    let last = word.last() == target_word.last();
    let key_points: i64 = match (first, last) {
        (true, true) => 0,
        (true, false) | (false, true) => 2,
        (false, false) => 7,
    };
    let length = length_difference(word, target_word);
    let content = (checksum(word) - checksum(target_word)).abs();
    (1 - length - key_points * 40 - content * 2) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn s(text: &str) -> Specimen {
        Specimen::from(text)
    }

    #[test]
    fn test_perfect_match_is_one() {
        for evaluator in Evaluator::ALL {
            assert_eq!(evaluator.evaluate(&s("AB"), &s("AB")), 1.0, "{evaluator:?}");
            assert_eq!(
                evaluator.evaluate(&s("METHINKS IT IS"), &s("METHINKS IT IS")),
                1.0,
                "{evaluator:?}"
            );
        }
    }

    #[test]
    fn test_discrete_values() {
        assert_eq!(Evaluator::Discrete.evaluate(&s("AC"), &s("AB")), 0.0);
        assert_eq!(Evaluator::Discrete.evaluate(&s("XY"), &s("AB")), -1.0);
        // One extra char: length penalty 1, padded position 'C' vs ' ' costs 1
        assert_eq!(Evaluator::Discrete.evaluate(&s("ABC"), &s("AB")), -1.0);
        // Trailing space matches the padding
        assert_eq!(Evaluator::Discrete.evaluate(&s("AB "), &s("AB")), 0.0);
    }

    #[test]
    fn test_continuous_rewards_close_chars() {
        let target = s("CAT");
        let near = Evaluator::Continuous.evaluate(&s("CAU"), &target);
        let far = Evaluator::Continuous.evaluate(&s("CAZ"), &target);
        assert_eq!(near, 0.0);
        assert_eq!(far, 1.0 - 6.0);
        assert!(near > far);
        // Discrete cannot tell them apart
        assert_eq!(
            Evaluator::Discrete.evaluate(&s("CAU"), &target),
            Evaluator::Discrete.evaluate(&s("CAZ"), &target)
        );
    }

    #[test]
    fn test_signature_values() {
        assert_eq!(signature(&[]), 0);
        // checksum("A") = 65; 65*2 + 1 + 65*3 + 65*3
        assert_eq!(signature(&['A']), 521);
        // checksum("AB") = 65 + 66 + 3 = 134; 268 + 2 + 195 + 198
        assert_eq!(signature(&['A', 'B']), 663);
        assert_eq!(specimen_signature(&s("A B")), 521 + 10_000 + 529);
    }

    #[test]
    fn test_complicated_is_coarse() {
        let target = s("AB CD");
        // Offsets depend on position only, so swapped words look identical
        let swapped = Evaluator::Complicated.evaluate(&s("CD AB"), &target);
        assert_eq!(swapped, 1.0);
        let misspelled = Evaluator::Complicated.evaluate(&s("AB CE"), &target);
        assert!(misspelled < 1.0);

        // A missing word costs at least the positional offset
        let short = Evaluator::Complicated.evaluate(&s("ABCDE"), &target);
        assert!(short <= 1.0 - 2.0 * WORD_OFFSET as f64 + 1.0, "got {short}");
    }

    #[test]
    fn test_word_fitness_key_points() {
        let target = ['C', 'A', 'T'];
        assert_eq!(word_fitness(&target, &target), 1.0);
        let first_only = word_fitness(&['C', 'A', 'U'], &target);
        let neither = word_fitness(&['D', 'A', 'U'], &target);
        // 1 - 2*40 - 2*1
        assert_eq!(first_only, -81.0);
        // 1 - 7*40 - 2*2
        assert_eq!(neither, -283.0);
    }

    proptest! {
        #[test]
        fn prop_discrete_symmetry(a in "[ABCT ]{0,12}", b in "[ABCT ]{0,12}") {
            let (a, b) = (s(&a), s(&b));
            prop_assert_eq!(
                Evaluator::Discrete.evaluate(&a, &b),
                Evaluator::Discrete.evaluate(&b, &a)
            );
        }

        #[test]
        fn prop_at_most_one(a in "[ABCT ]{0,12}", b in "[ABCT ]{1,12}") {
            let (a, b) = (s(&a), s(&b));
            for evaluator in [Evaluator::Discrete, Evaluator::Continuous] {
                let score = evaluator.evaluate(&a, &b);
                prop_assert!(score <= 1.0);
                prop_assert_eq!(score == 1.0, a == b);
            }
            prop_assert!(Evaluator::Complicated.evaluate(&a, &b) <= 1.0);
        }
    }
}
