//! Run-level statistics.
//!
//! [`RunStats`] is created together with the initial population and
//! updated exactly once per generation by
//! [`RunState::step`](super::RunState::step).

use std::fmt;
use std::time::{Duration, SystemTime};

/// Scale applied to the fitness-per-death ratio.
const EFFICIENCY_SCALE: f64 = 100_000.0;

/// Fitness gained per specimen death, scaled for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Efficiency {
    /// No deaths to divide by yet.
    #[default]
    Undefined,
    /// `round(|fitness gain / deaths| * 100000)`.
    Value(u64),
}

impl Efficiency {
    /// The scaled value, if defined.
    pub fn value(self) -> Option<u64> {
        match self {
            Efficiency::Undefined => None,
            Efficiency::Value(v) => Some(v),
        }
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Efficiency::Undefined => f.write_str("n/a"),
            Efficiency::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Computes `round(|fitness_gain / deaths| * 100000)`.
///
/// Zero deaths gives [`Efficiency::Undefined`].
pub fn efficiency(fitness_gain: f64, deaths: usize) -> Efficiency {
    if deaths == 0 {
        return Efficiency::Undefined;
    }
    Efficiency::Value(((fitness_gain / deaths as f64).abs() * EFFICIENCY_SCALE).round() as u64)
}

/// Statistics tracked across a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Current generation, starting at 1.
    pub generation: usize,

    /// Specimens replaced in the most recent generation.
    pub last_died: usize,

    /// Deaths since the best fitness last changed.
    pub died_since_improvement: usize,

    /// Deaths across the whole run.
    pub total_dead: usize,

    /// Best fitness in the current population.
    pub best_fitness: f64,

    /// Best fitness before the most recent generation.
    pub previous_best_fitness: f64,

    /// Size of the most recent change in best fitness.
    ///
    /// Kept across generations in which the best fitness does not move.
    pub last_improvement: f64,

    /// Best fitness of the initial population.
    pub initial_fitness: f64,

    /// Efficiency since the last improvement.
    pub efficiency: Efficiency,

    /// Efficiency over the whole run, set once the run terminates.
    pub overall_efficiency: Efficiency,

    /// When the driver started stepping.
    pub started_at: Option<SystemTime>,

    /// When the run terminated, as reported by the driver.
    pub ended_at: Option<SystemTime>,
}

impl RunStats {
    /// Statistics for a freshly created population whose best fitness is
    /// `initial_fitness`.
    pub fn new(initial_fitness: f64) -> Self {
        Self {
            generation: 1,
            last_died: 0,
            died_since_improvement: 0,
            total_dead: 0,
            best_fitness: initial_fitness,
            previous_best_fitness: initial_fitness,
            last_improvement: 0.0,
            initial_fitness,
            efficiency: Efficiency::Undefined,
            overall_efficiency: Efficiency::Undefined,
            started_at: None,
            ended_at: None,
        }
    }

    /// Folds one generation into the statistics.
    ///
    /// `died` specimens were replaced and the new population's best
    /// fitness is `best_fitness`. Returns `true` if the best fitness moved.
    pub fn record_generation(&mut self, died: usize, best_fitness: f64) -> bool {
        self.last_died = died;
        self.total_dead += died;
        self.generation += 1;
        self.previous_best_fitness = self.best_fitness;
        self.best_fitness = best_fitness;

        let changed = self.best_fitness != self.previous_best_fitness;
        if changed {
            self.last_improvement = self.best_fitness - self.previous_best_fitness;
            self.died_since_improvement = died;
        } else {
            self.died_since_improvement += died;
        }
        self.efficiency = efficiency(self.last_improvement, self.died_since_improvement);
        changed
    }

    /// Efficiency over the whole run: fitness gained since the initial
    /// population per total deaths.
    pub fn compute_overall_efficiency(&self) -> Efficiency {
        efficiency(self.best_fitness - self.initial_fitness, self.total_dead)
    }

    /// Wall-clock duration between start and end, when both are known.
    pub fn runtime(&self) -> Option<Duration> {
        let (start, end) = (self.started_at?, self.ended_at?);
        end.duration_since(start).ok()
    }
}
