//! Errors raised when a run is set up.
//!
//! Stepping a run never fails; every error here surfaces at
//! [`RunState::initialize`](super::RunState::initialize) or when a
//! [`WeaselRunner`](super::WeaselRunner) starts.

/// Invalid [`WeaselConfig`](super::WeaselConfig) parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be positive")]
    PopulationTooSmall,
    #[error("Survival rate {0} is outside (0, 1]")]
    SurvivalRateOutOfRange(f64),
    #[error("Mutation rate {0} is outside [0, 1]")]
    MutationRateOutOfRange(f64),
    #[error("Alphabet must not be empty")]
    EmptyAlphabet,
    #[error("Survival rate {survival_rate} keeps no specimen of a population of {population_size}")]
    NoSurvivors {
        population_size: usize,
        survival_rate: f64,
    },
    #[error("Mutation policy has no operators to roll")]
    EmptyMutationPolicy,
    #[error("max_generations must be positive or None")]
    ZeroMaxGenerations,
    #[error("time_limit_ms must be positive or None")]
    ZeroTimeLimit,
}

/// Failure to start a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeaselError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Target must not be empty")]
    EmptyTarget,
}
