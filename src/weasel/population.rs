//! Population construction, selection and scale-up.
//!
//! One generation is [`select_fittest`] followed by
//! [`scale_up_population`], composed by [`new_generation`]. Survivors move
//! into the next generation verbatim at the front of the population; only
//! freshly cloned specimens can be mutated.

use super::alphabet::Alphabet;
use super::config::WeaselConfig;
use super::fitness::Evaluator;
use super::operators::MutationPolicy;
use super::specimen::Specimen;
use crate::random::random_index;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds one specimen of `length` random alphabet characters.
pub fn new_specimen<R: Rng>(length: usize, alphabet: &Alphabet, rng: &mut R) -> Specimen {
    Specimen::from_chars((0..length).map(|_| alphabet.random_char(rng)).collect())
}

/// Builds `size` independent random specimens, each `median_length` long.
pub fn new_population<R: Rng>(
    size: usize,
    median_length: usize,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Vec<Specimen> {
    (0..size)
        .map(|_| new_specimen(median_length, alphabet, rng))
        .collect()
}

/// Scores every specimen and orders them best first.
///
/// Returns `(index, fitness)` pairs. The sort is stable, so equal scores
/// keep their population order.
pub fn rank(
    population: &[Specimen],
    target: &Specimen,
    evaluator: Evaluator,
    parallel: bool,
) -> Vec<(usize, f64)> {
    let mut scored = score_population(population, target, evaluator, parallel);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

#[cfg(feature = "parallel")]
fn score_population(
    population: &[Specimen],
    target: &Specimen,
    evaluator: Evaluator,
    parallel: bool,
) -> Vec<(usize, f64)> {
    if parallel {
        population
            .par_iter()
            .enumerate()
            .map(|(i, s)| (i, evaluator.evaluate(s, target)))
            .collect()
    } else {
        score_sequential(population, target, evaluator)
    }
}

#[cfg(not(feature = "parallel"))]
fn score_population(
    population: &[Specimen],
    target: &Specimen,
    evaluator: Evaluator,
    _parallel: bool,
) -> Vec<(usize, f64)> {
    score_sequential(population, target, evaluator)
}

fn score_sequential(
    population: &[Specimen],
    target: &Specimen,
    evaluator: Evaluator,
) -> Vec<(usize, f64)> {
    population
        .iter()
        .enumerate()
        .map(|(i, s)| (i, evaluator.evaluate(s, target)))
        .collect()
}

/// Keeps the `n` fittest specimens, best first.
///
/// Ties keep their original relative order.
pub fn select_fittest(
    population: Vec<Specimen>,
    n: usize,
    target: &Specimen,
    evaluator: Evaluator,
    parallel: bool,
) -> Vec<Specimen> {
    let order = rank(&population, target, evaluator, parallel);
    select_ranked(population, &order, n)
}

/// Keeps the first `n` specimens of `order`, a [`rank`] of `population`.
pub fn select_ranked(
    population: Vec<Specimen>,
    order: &[(usize, f64)],
    n: usize,
) -> Vec<Specimen> {
    let mut slots: Vec<Option<Specimen>> = population.into_iter().map(Some).collect();
    order
        .iter()
        .take(n)
        .filter_map(|&(i, _)| slots.get_mut(i).and_then(Option::take))
        .collect()
}

/// Refills `survivors` to `size` with clones of random members.
///
/// Each clone is mutated with probability `mutation_rate` by `policy`.
/// Parents are drawn from the growing population, so a clone appended
/// earlier in the refill can parent a later one and mutations compound.
/// The original survivors stay untouched at the front. Survivors already at
/// or above `size` are returned unchanged, without truncation.
pub fn scale_up_population<R: Rng>(
    mut survivors: Vec<Specimen>,
    size: usize,
    mutation_rate: f64,
    policy: &MutationPolicy,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Vec<Specimen> {
    if survivors.is_empty() || survivors.len() >= size {
        return survivors;
    }
    survivors.reserve(size - survivors.len());
    while survivors.len() < size {
        let parent = &survivors[random_index(survivors.len(), rng)];
        let child = if rng.random::<f64>() < mutation_rate {
            policy.mutate(parent, alphabet, rng)
        } else {
            parent.clone()
        };
        survivors.push(child);
    }
    survivors
}

/// Produces the next generation: keep the
/// [`survivor_count`](WeaselConfig::survivor_count) fittest, then scale
/// back up to the current population size.
pub fn new_generation<R: Rng>(
    population: Vec<Specimen>,
    target: &Specimen,
    config: &WeaselConfig,
    rng: &mut R,
) -> Vec<Specimen> {
    let order = rank(&population, target, config.evaluator, config.parallel);
    new_generation_ranked(population, &order, config, rng)
}

/// [`new_generation`] for a population whose [`rank`] is already known.
pub fn new_generation_ranked<R: Rng>(
    population: Vec<Specimen>,
    order: &[(usize, f64)],
    config: &WeaselConfig,
    rng: &mut R,
) -> Vec<Specimen> {
    let size = population.len();
    let survivors = select_ranked(population, order, config.survivor_count(size));
    scale_up_population(
        survivors,
        size,
        config.mutation_rate,
        &config.mutation,
        &config.alphabet,
        rng,
    )
}

/// Highest fitness in `population`, or `f64::NEG_INFINITY` if it is empty.
pub fn best_fitness(
    population: &[Specimen],
    target: &Specimen,
    evaluator: Evaluator,
    parallel: bool,
) -> f64 {
    rank(population, target, evaluator, parallel)
        .first()
        .map(|&(_, f)| f)
        .unwrap_or(f64::NEG_INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::weasel::Mutation;

    fn specimens(texts: &[&str]) -> Vec<Specimen> {
        texts.iter().map(|&t| Specimen::from(t)).collect()
    }

    #[test]
    fn test_new_population_shape() {
        let mut rng = create_rng(42);
        let alphabet = Alphabet::new("ABCT ");
        let pop = new_population(30, 3, &alphabet, &mut rng);
        assert_eq!(pop.len(), 30);
        for s in &pop {
            assert_eq!(s.len(), 3);
            assert!(s.chars().iter().all(|c| alphabet.chars().contains(c)));
        }
    }

    #[test]
    fn test_rank_is_stable() {
        let pop = specimens(&["XX", "AX", "XB", "AB", "XX"]);
        let target = Specimen::from("AB");
        let order = rank(&pop, &target, Evaluator::Discrete, false);
        let indices: Vec<usize> = order.iter().map(|&(i, _)| i).collect();
        assert_eq!(indices, vec![3, 1, 2, 0, 4]);
        assert_eq!(order[0].1, 1.0);
    }

    #[test]
    fn test_select_fittest() {
        let pop = specimens(&["XX", "AX", "XB", "AB"]);
        let target = Specimen::from("AB");
        let fittest = select_fittest(pop, 2, &target, Evaluator::Discrete, false);
        assert_eq!(fittest, specimens(&["AB", "AX"]));
    }

    #[test]
    fn test_select_more_than_available() {
        let pop = specimens(&["XX", "AB"]);
        let target = Specimen::from("AB");
        let fittest = select_fittest(pop, 5, &target, Evaluator::Discrete, false);
        assert_eq!(fittest, specimens(&["AB", "XX"]));
    }

    #[test]
    fn test_scale_up_fills_to_size() {
        let mut rng = create_rng(42);
        let alphabet = Alphabet::new("ABCT ");
        let survivors = specimens(&["CAT", "BAT"]);
        let scaled = scale_up_population(
            survivors,
            10,
            0.0,
            &MutationPolicy::default(),
            &alphabet,
            &mut rng,
        );
        assert_eq!(scaled.len(), 10);
        // No mutation: every clone is an exact copy of a survivor
        assert!(scaled.iter().all(|s| *s == "CAT" || *s == "BAT"));
    }

    #[test]
    fn test_scale_up_never_truncates() {
        let mut rng = create_rng(42);
        let alphabet = Alphabet::new("ABCT ");
        let survivors = specimens(&["A", "B", "C"]);
        let scaled = scale_up_population(
            survivors.clone(),
            2,
            1.0,
            &MutationPolicy::default(),
            &alphabet,
            &mut rng,
        );
        assert_eq!(scaled, survivors);
    }

    #[test]
    fn test_survivors_are_kept_verbatim() {
        let mut rng = create_rng(42);
        let alphabet = Alphabet::new("ABCT ");
        let survivors = specimens(&["CAT", "TAC", "ACT"]);
        let scaled = scale_up_population(
            survivors.clone(),
            30,
            1.0,
            &MutationPolicy::Fixed(Mutation::Delete),
            &alphabet,
            &mut rng,
        );
        assert_eq!(&scaled[..3], &survivors[..]);
        assert!(scaled[3..].iter().all(|s| s.len() < 3));
    }

    #[test]
    fn test_clones_can_parent_clones() {
        let alphabet = Alphabet::new("A");
        let policy = MutationPolicy::Fixed(Mutation::Duplicate);
        let mut longest = 0;
        for seed in 0..50 {
            let mut rng = create_rng(seed);
            let scaled =
                scale_up_population(specimens(&["A"]), 6, 1.0, &policy, &alphabet, &mut rng);
            assert_eq!(scaled.len(), 6);
            assert_eq!(scaled[0], "A");
            longest = longest.max(scaled.iter().map(Specimen::len).max().unwrap_or(0));
        }
        // A clone of "A" is "AA"; anything longer descends from another clone
        assert!(longest > 2);
    }

    #[test]
    fn test_new_generation_preserves_size() {
        let mut rng = create_rng(42);
        let config = WeaselConfig::default()
            .with_population_size(37)
            .with_survival_rate(0.3)
            .with_alphabet("ABCT ")
            .with_mutation(Mutation::Duplicate)
            .with_parallel(false);
        let target = Specimen::from("CAT");
        let mut pop = new_population(37, 3, &config.alphabet, &mut rng);
        for _ in 0..20 {
            pop = new_generation(pop, &target, &config, &mut rng);
            assert_eq!(pop.len(), 37);
        }
    }

    #[test]
    fn test_new_generation_keeps_top_survivor() {
        let mut rng = create_rng(42);
        let config = WeaselConfig::default()
            .with_population_size(20)
            .with_alphabet("ABCT ")
            .with_parallel(false);
        let target = Specimen::from("CAT");
        let pop = new_population(20, 3, &config.alphabet, &mut rng);
        let before = best_fitness(&pop, &target, Evaluator::Discrete, false);
        let next = new_generation(pop, &target, &config, &mut rng);
        let after = best_fitness(&next, &target, Evaluator::Discrete, false);
        assert!(after >= before);
    }

    #[test]
    fn test_ranked_generation_matches_unranked() {
        let config = WeaselConfig::default()
            .with_population_size(30)
            .with_alphabet("ABCT ")
            .with_parallel(false);
        let target = Specimen::from("CAT");
        let pop = new_population(30, 3, &config.alphabet, &mut create_rng(7));
        let order = rank(&pop, &target, config.evaluator, false);

        let a = new_generation(pop.clone(), &target, &config, &mut create_rng(1));
        let b = new_generation_ranked(pop, &order, &config, &mut create_rng(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_best_fitness_empty() {
        let target = Specimen::from("CAT");
        assert_eq!(
            best_fitness(&[], &target, Evaluator::Discrete, false),
            f64::NEG_INFINITY
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_rank_matches_sequential() {
        let mut rng = create_rng(42);
        let alphabet = Alphabet::new("ABCT ");
        let pop = new_population(200, 5, &alphabet, &mut rng);
        let target = Specimen::from("CAT T");
        assert_eq!(
            rank(&pop, &target, Evaluator::Continuous, true),
            rank(&pop, &target, Evaluator::Continuous, false)
        );
    }
}
