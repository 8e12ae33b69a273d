//! Run state and the generation-stepping loop.
//!
//! [`RunState`] is the value a driver threads through a run:
//! [`initialize`](RunState::initialize) → [`step`](RunState::step) … →
//! [`is_terminal`](RunState::is_terminal). The engine performs no timing,
//! rendering or I/O of its own; wall-clock bounds are stamped with times the
//! driver supplies.
//!
//! [`WeaselRunner`] is the native driver: it steps a state until the target
//! is reached or a configured bound trips.

use super::config::WeaselConfig;
use super::error::WeaselError;
use super::population::{new_generation_ranked, new_population, rank};
use super::specimen::Specimen;
use super::stats::RunStats;
use crate::random::create_rng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Fitness of an exact match.
pub const PERFECT_FITNESS: f64 = 1.0;

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPhase {
    /// Population and statistics built, no generation stepped yet.
    Initialized,
    /// At least one generation stepped.
    Running,
    /// Perfect fitness reached, or stopped by the driver.
    Terminated,
}

/// Everything a run carries between generations.
#[derive(Debug, Clone)]
pub struct RunState {
    config: WeaselConfig,
    target: Specimen,
    population: Vec<Specimen>,
    stats: RunStats,
    phase: RunPhase,
    rng: StdRng,
    /// [`rank`] of `population`, refreshed after every generation.
    ranking: Vec<(usize, f64)>,
}

impl RunState {
    /// Builds the initial population and statistics for `target`.
    ///
    /// Every specimen starts with the target's length.
    ///
    /// # Errors
    ///
    /// [`WeaselError::EmptyTarget`] for an empty target and
    /// [`WeaselError::InvalidConfiguration`] when
    /// [`WeaselConfig::validate`] fails.
    pub fn initialize(target: &str, config: WeaselConfig) -> Result<Self, WeaselError> {
        if target.is_empty() {
            return Err(WeaselError::EmptyTarget);
        }
        config.validate()?;

        let target = Specimen::from(target);
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let population = new_population(
            config.population_size,
            target.len(),
            &config.alphabet,
            &mut rng,
        );
        let ranking = rank(&population, &target, config.evaluator, config.parallel);
        let initial = top_fitness(&ranking);

        log::info!(
            "initialized run: target {:?}, population {}, initial best fitness {}",
            target.to_string(),
            population.len(),
            initial
        );

        let mut state = Self {
            config,
            target,
            population,
            stats: RunStats::new(initial),
            phase: RunPhase::Initialized,
            rng,
            ranking,
        };
        if state.is_terminal() {
            state.terminate();
        }
        Ok(state)
    }

    /// Advances exactly one generation and returns the updated state.
    ///
    /// A terminated state is returned unchanged.
    pub fn step(mut self) -> Self {
        self.advance();
        self
    }

    /// In-place form of [`step`](Self::step).
    pub fn advance(&mut self) {
        if self.phase == RunPhase::Terminated {
            log::trace!("step ignored: run already terminated");
            return;
        }
        self.phase = RunPhase::Running;

        let population = std::mem::take(&mut self.population);
        self.population =
            new_generation_ranked(population, &self.ranking, &self.config, &mut self.rng);
        self.ranking = rank(
            &self.population,
            &self.target,
            self.config.evaluator,
            self.config.parallel,
        );

        let changed = self.stats.record_generation(
            self.config.deaths_per_generation(),
            top_fitness(&self.ranking),
        );

        if changed {
            log::debug!(
                "generation {}: best fitness {} -> {}, efficiency {}",
                self.stats.generation,
                self.stats.previous_best_fitness,
                self.stats.best_fitness,
                self.stats.efficiency
            );
        } else {
            log::trace!(
                "generation {}: best fitness {}",
                self.stats.generation,
                self.stats.best_fitness
            );
        }

        if self.is_terminal() {
            self.terminate();
        }
    }

    /// `true` once the best fitness is exactly [`PERFECT_FITNESS`].
    pub fn is_terminal(&self) -> bool {
        self.stats.best_fitness == PERFECT_FITNESS
    }

    /// Top-ranked specimen of the current population and its fitness.
    ///
    /// Ties go to the earlier specimen in population order.
    pub fn best_specimen(&self) -> (&Specimen, f64) {
        // The population is never empty: validate() rejects a zero size.
        let (index, fitness) = self
            .ranking
            .first()
            .copied()
            .unwrap_or((0, f64::NEG_INFINITY));
        (&self.population[index], fitness)
    }

    /// Records when the driver started stepping.
    pub fn mark_started(&mut self, at: SystemTime) {
        self.stats.started_at = Some(at);
    }

    /// Ends the run at the driver's request, stamping `at` as the end time.
    ///
    /// Computes the overall efficiency if the run had not terminated yet.
    pub fn finish(&mut self, at: SystemTime) {
        if self.phase != RunPhase::Terminated {
            self.terminate();
        }
        self.stats.ended_at = Some(at);
    }

    fn terminate(&mut self) {
        self.phase = RunPhase::Terminated;
        self.stats.overall_efficiency = self.stats.compute_overall_efficiency();
        log::info!(
            "run terminated after {} generations: best fitness {}, {} dead, overall efficiency {}",
            self.stats.generation,
            self.stats.best_fitness,
            self.stats.total_dead,
            self.stats.overall_efficiency
        );
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current population.
    pub fn population(&self) -> &[Specimen] {
        &self.population
    }

    /// Run statistics.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The fixed target.
    pub fn target(&self) -> &Specimen {
        &self.target
    }

    /// The configuration the run was initialized with.
    pub fn config(&self) -> &WeaselConfig {
        &self.config
    }
}

fn top_fitness(ranking: &[(usize, f64)]) -> f64 {
    ranking.first().map_or(f64::NEG_INFINITY, |&(_, f)| f)
}

/// Result of a [`WeaselRunner`] run.
#[derive(Debug, Clone)]
pub struct WeaselResult {
    /// Best specimen of the final population.
    pub best: Specimen,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Generation count at the end of the run (starts at 1).
    pub generations: usize,

    /// Whether the target was matched exactly.
    pub reached_target: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Final statistics.
    pub stats: RunStats,

    /// Best fitness of the initial population and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Steps a run to completion.
///
/// # Usage
///
/// ```
/// use u_weasel::weasel::{WeaselConfig, WeaselRunner};
///
/// let config = WeaselConfig::default()
///     .with_alphabet("ABCT ")
///     .with_seed(42)
///     .with_max_generations(5000);
/// let result = WeaselRunner::run("CAT", config).unwrap();
/// assert!(result.reached_target);
/// assert_eq!(result.best, "CAT");
/// ```
pub struct WeaselRunner;

impl WeaselRunner {
    /// Runs until the target is reached or a configured bound trips.
    pub fn run(target: &str, config: WeaselConfig) -> Result<WeaselResult, WeaselError> {
        Self::run_with_cancel(target, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation.
    pub fn run_with_cancel(
        target: &str,
        config: WeaselConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<WeaselResult, WeaselError> {
        Self::run_observed(target, config, cancel, |_| {})
    }

    /// Runs with a cancellation token, calling `observer` after
    /// initialization and after every generation.
    pub fn run_observed<F>(
        target: &str,
        config: WeaselConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<WeaselResult, WeaselError>
    where
        F: FnMut(&RunState),
    {
        let max_generations = config.max_generations;
        let time_limit_ms = config.time_limit_ms;

        let mut state = RunState::initialize(target, config)?;
        let started = Instant::now();
        state.mark_started(SystemTime::now());
        observer(&state);

        let mut fitness_history = vec![state.stats().best_fitness];
        let mut cancelled = false;
        let mut steps = 0usize;

        while !state.is_terminal() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if max_generations.is_some_and(|max| steps >= max) {
                break;
            }
            if time_limit_ms.is_some_and(|ms| started.elapsed().as_millis() >= u128::from(ms)) {
                log::debug!("time limit of {:?} ms reached", time_limit_ms);
                break;
            }

            state.advance();
            steps += 1;
            fitness_history.push(state.stats().best_fitness);
            observer(&state);
        }

        state.finish(SystemTime::now());

        let (best, best_fitness) = state.best_specimen();
        let best = best.clone();
        Ok(WeaselResult {
            best,
            best_fitness,
            generations: state.stats().generation,
            reached_target: state.is_terminal(),
            cancelled,
            stats: state.stats().clone(),
            fitness_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
