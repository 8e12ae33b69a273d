//! String evolution engine.
//!
//! Evolves a population of random strings toward a target string with a
//! generational genetic algorithm, after Dawkins' "weasel" program: keep
//! the fittest survivors, refill the population with (possibly mutated)
//! clones, repeat until a specimen matches the target exactly.
//!
//! # Key Types
//!
//! - [`WeaselConfig`]: Population size, survival and mutation rates,
//!   alphabet, evaluator and mutation policy
//! - [`RunState`]: One run, stepped a generation at a time by a driver
//! - [`RunStats`]: Generation count, deaths, best fitness and efficiency
//! - [`WeaselRunner`]: Native driver that steps a run to completion
//!
//! # Submodules
//!
//! - [`operators`]: Mutation operators and the operator-selection policy
//! - [`fitness`]: Discrete, continuous and word-aware evaluators
//! - [`population`]: Selection, scale-up and generation stepping
//!
//! # References
//!
//! - Dawkins (1986), *The Blind Watchmaker*, ch. 3
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod alphabet;
mod config;
mod error;
pub mod fitness;
pub mod operators;
pub mod population;
mod runner;
mod specimen;
mod stats;

pub use alphabet::{randomize_char, Alphabet, DEFAULT_ALPHABET};
pub use config::WeaselConfig;
pub use error::{ConfigError, WeaselError};
pub use fitness::Evaluator;
pub use operators::{Mutation, MutationPolicy};
pub use runner::{RunPhase, RunState, WeaselResult, WeaselRunner, PERFECT_FITNESS};
pub use specimen::Specimen;
pub use stats::{efficiency, Efficiency, RunStats};
