//! Great Deluge acceptor.

use std::fmt::Debug;

use planforge_core::{PlanforgeError, PlanningSolution, Result, Score};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;

/// Great Deluge acceptor - accepts moves above a rising water level.
///
/// The water level starts at the phase's starting score and rises after
/// every step by `rain_speed * |starting score|`, floored per level. A
/// candidate is accepted if it is at or above the water level, or if it
/// beats the last step.
///
/// # Example
///
/// ```
/// use planforge_solver::GreatDelugeAcceptor;
/// use planforge_test::NQueensSolution;
///
/// // The water level rises by 0.1% of the starting score per step
/// let acceptor = GreatDelugeAcceptor::<NQueensSolution>::new(0.001);
/// assert_eq!(acceptor.water_level(), None);
/// ```
pub struct GreatDelugeAcceptor<S: PlanningSolution> {
    /// Share of the starting score's magnitude added per step.
    rain_speed: f64,
    water_level: Option<S::Score>,
    increment: Option<S::Score>,
}

impl<S: PlanningSolution> Debug for GreatDelugeAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreatDelugeAcceptor")
            .field("rain_speed", &self.rain_speed)
            .field("water_level", &self.water_level)
            .finish()
    }
}

impl<S: PlanningSolution> GreatDelugeAcceptor<S> {
    /// Creates a new Great Deluge acceptor.
    ///
    /// # Arguments
    /// * `rain_speed` - Typical values: 0.0001 to 0.01
    pub fn new(rain_speed: f64) -> Self {
        Self {
            rain_speed,
            water_level: None,
            increment: None,
        }
    }

    pub fn water_level(&self) -> Option<S::Score> {
        self.water_level
    }
}

impl<S: PlanningSolution> Default for GreatDelugeAcceptor<S> {
    fn default() -> Self {
        Self::new(0.001)
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for GreatDelugeAcceptor<S> {
    fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        if !(self.rain_speed > 0.0 && self.rain_speed.is_finite()) {
            return Err(PlanforgeError::Config(format!(
                "the rain speed ({}) must be positive",
                self.rain_speed
            )));
        }
        self.water_level = Some(*starting_score);
        self.increment = Some(starting_score.abs().multiply(self.rain_speed));
        Ok(())
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        if candidate.score > candidate.last_step_score {
            return true;
        }
        self.water_level
            .is_some_and(|water_level| candidate.score >= water_level)
    }

    fn step_ended(&mut self, _outcome: &StepOutcome<'_, S, M>) {
        if let (Some(water_level), Some(increment)) = (self.water_level, self.increment) {
            self.water_level = Some(water_level + increment);
        }
    }

    fn phase_ended(&mut self) {
        self.water_level = None;
        self.increment = None;
    }
}
