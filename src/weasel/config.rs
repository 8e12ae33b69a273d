//! Run configuration.
//!
//! [`WeaselConfig`] holds every parameter that shapes a run: population
//! size, survival and mutation rates, the alphabet, and which evaluator and
//! mutation policy are active.

use super::alphabet::Alphabet;
use super::error::ConfigError;
use super::fitness::Evaluator;
use super::operators::{Mutation, MutationPolicy};

/// Configuration for a string evolution run.
///
/// # Defaults
///
/// ```
/// use u_weasel::weasel::WeaselConfig;
///
/// let config = WeaselConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert!((config.survival_rate - 0.5).abs() < 1e-12);
/// assert!((config.mutation_rate - 0.8).abs() < 1e-12);
/// assert_eq!(config.max_generations, Some(10_000));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_weasel::weasel::{Evaluator, Mutation, WeaselConfig};
///
/// let config = WeaselConfig::default()
///     .with_population_size(50)
///     .with_alphabet("ABCT ")
///     .with_evaluator(Evaluator::Continuous)
///     .with_mutations(vec![Mutation::Replace, Mutation::Randomize])
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaselConfig {
    /// Number of specimens in every generation.
    pub population_size: usize,

    /// Fraction of the population kept as survivors each generation, in
    /// `(0, 1]`.
    pub survival_rate: f64,

    /// Probability that a clone is mutated, in `[0, 1]`.
    pub mutation_rate: f64,

    /// Character pool for random specimens and mutations.
    pub alphabet: Alphabet,

    /// Active fitness function.
    pub evaluator: Evaluator,

    /// Which mutation operator runs on a mutated clone.
    pub mutation: MutationPolicy,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to score specimens in parallel using rayon.
    ///
    /// Only has an effect with the `parallel` feature.
    pub parallel: bool,

    /// Generation cap for [`WeaselRunner`](super::WeaselRunner).
    ///
    /// Defaults to 10,000 so a run on an unreachable target still returns.
    /// `None` steps until the target is reached or the run is stopped by
    /// another bound. Ignored by manual stepping.
    pub max_generations: Option<usize>,

    /// Wall-clock limit for [`WeaselRunner`](super::WeaselRunner) in
    /// milliseconds, checked between generations.
    pub time_limit_ms: Option<u64>,
}

impl Default for WeaselConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            survival_rate: 0.5,
            mutation_rate: 0.8,
            alphabet: Alphabet::default(),
            evaluator: Evaluator::default(),
            mutation: MutationPolicy::default(),
            seed: None,
            parallel: true,
            max_generations: Some(10_000),
            time_limit_ms: None,
        }
    }
}

impl WeaselConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the survival rate.
    ///
    /// Not clamped; [`validate`](Self::validate) rejects values outside
    /// `(0, 1]`.
    pub fn with_survival_rate(mut self, rate: f64) -> Self {
        self.survival_rate = rate;
        self
    }

    /// Sets the mutation rate.
    ///
    /// Not clamped; [`validate`](Self::validate) rejects values outside
    /// `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the alphabet.
    pub fn with_alphabet(mut self, alphabet: impl Into<Alphabet>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Sets the fitness evaluator.
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Sets the mutation policy.
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation = policy;
        self
    }

    /// Always applies `mutation` to mutated clones.
    pub fn with_mutation(self, mutation: Mutation) -> Self {
        self.with_mutation_policy(MutationPolicy::Fixed(mutation))
    }

    /// Rolls one of `mutations` for every mutated clone.
    pub fn with_mutations(self, mutations: Vec<Mutation>) -> Self {
        self.with_mutation_policy(MutationPolicy::Roll(mutations))
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the generation cap used by the runner.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the wall-clock limit used by the runner.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of survivors kept from a population of `population_len`:
    /// `round(survival_rate * population_len)`.
    pub fn survivor_count(&self, population_len: usize) -> usize {
        (self.survival_rate * population_len as f64).round() as usize
    }

    /// Specimens replaced per generation:
    /// `round(population_size * (1 - survival_rate))`.
    pub fn deaths_per_generation(&self) -> usize {
        (self.population_size as f64 * (1.0 - self.survival_rate)).round() as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if !(self.survival_rate > 0.0 && self.survival_rate <= 1.0) {
            return Err(ConfigError::SurvivalRateOutOfRange(self.survival_rate));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange(self.mutation_rate));
        }
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        if self.survivor_count(self.population_size) == 0 {
            return Err(ConfigError::NoSurvivors {
                population_size: self.population_size,
                survival_rate: self.survival_rate,
            });
        }
        if !self.mutation.is_usable() {
            return Err(ConfigError::EmptyMutationPolicy);
        }
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroMaxGenerations);
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
