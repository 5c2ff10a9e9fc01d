//! Simulated annealing acceptor.

use std::fmt::Debug;
use std::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planforge_core::{PlanforgeError, PlanningSolution, Result, Score};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;

/// Temperatures never cool below this, so the accept chance stays defined.
const TEMPERATURE_MINIMUM: f64 = 1.0e-100;

/// Simulated annealing acceptor - accepts worsening moves with a chance
/// that shrinks as the search cools down.
///
/// Every score level has its own temperature. A candidate at least as
/// good as the last step is always accepted. Otherwise, for each level
/// the candidate loses on, the chance is multiplied by
/// `exp(-loss / temperature)`. Temperatures start at the configured
/// levels and are multiplied by `decay_rate` after every step.
///
/// # Example
///
/// ```
/// use planforge_core::SimpleScore;
/// use planforge_solver::SimulatedAnnealingAcceptor;
/// use planforge_test::NQueensSolution;
///
/// let acceptor = SimulatedAnnealingAcceptor::<NQueensSolution>::new(vec![2.0], 0.995)
///     .with_seed(7);
/// assert_eq!(acceptor.temperatures(), &[2.0]);
///
/// let from_score =
///     SimulatedAnnealingAcceptor::<NQueensSolution>::with_starting_temperature(
///         SimpleScore::of(3),
///         0.99,
///     );
/// assert_eq!(from_score.temperatures(), &[3.0]);
/// ```
pub struct SimulatedAnnealingAcceptor<S: PlanningSolution> {
    starting_temperatures: Vec<f64>,
    decay_rate: f64,
    temperatures: Vec<f64>,
    rng: StdRng,
    _phantom: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution> SimulatedAnnealingAcceptor<S> {
    /// Creates an acceptor from one starting temperature per score level.
    ///
    /// # Arguments
    /// * `starting_temperatures` - Highest priority level first
    /// * `decay_rate` - Multiplicative cooling per step, in `(0, 1]`
    pub fn new(starting_temperatures: Vec<f64>, decay_rate: f64) -> Self {
        Self {
            temperatures: starting_temperatures.clone(),
            starting_temperatures,
            decay_rate,
            rng: StdRng::from_os_rng(),
            _phantom: PhantomData,
        }
    }

    /// Uses the levels of a score as starting temperatures.
    pub fn with_starting_temperature(starting_temperature: S::Score, decay_rate: f64) -> Self {
        let levels = starting_temperature
            .to_level_numbers()
            .into_iter()
            .map(|level| level as f64)
            .collect();
        Self::new(levels, decay_rate)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Current temperature of every level.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// Chance of accepting a candidate that scores `move_score` after a
    /// step that scored `last_step_score`.
    fn accept_chance(&self, last_step_score: &S::Score, move_score: &S::Score) -> f64 {
        let difference = (*last_step_score - *move_score).to_level_numbers();
        difference
            .iter()
            .zip(&self.temperatures)
            .filter(|(loss, _)| **loss > 0)
            .map(|(&loss, &temperature)| (-(loss as f64) / temperature).exp())
            .product()
    }
}

impl<S: PlanningSolution> Debug for SimulatedAnnealingAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAnnealingAcceptor")
            .field("starting_temperatures", &self.starting_temperatures)
            .field("decay_rate", &self.decay_rate)
            .field("temperatures", &self.temperatures)
            .finish()
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for SimulatedAnnealingAcceptor<S> {
    fn phase_started(&mut self, _starting_score: &S::Score) -> Result<()> {
        let levels_count = S::Score::levels_count();
        if self.starting_temperatures.len() != levels_count {
            return Err(PlanforgeError::Config(format!(
                "the starting temperature has {} levels but the score has {levels_count}",
                self.starting_temperatures.len()
            )));
        }
        if self.starting_temperatures.iter().any(|t| *t < 0.0) {
            return Err(PlanforgeError::Config(
                "the starting temperature must not be negative".to_string(),
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(PlanforgeError::Config(format!(
                "the decay rate ({}) must be in (0, 1]",
                self.decay_rate
            )));
        }
        self.temperatures = self
            .starting_temperatures
            .iter()
            .map(|t| t.max(TEMPERATURE_MINIMUM))
            .collect();
        Ok(())
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        if candidate.score >= candidate.last_step_score {
            return true;
        }
        let accept_chance = self.accept_chance(&candidate.last_step_score, &candidate.score);
        self.rng.random::<f64>() < accept_chance
    }

    fn step_ended(&mut self, _outcome: &StepOutcome<'_, S, M>) {
        for temperature in &mut self.temperatures {
            *temperature = (*temperature * self.decay_rate).max(TEMPERATURE_MINIMUM);
        }
    }

    fn phase_ended(&mut self) {
        self.temperatures = self.starting_temperatures.clone();
    }
}
