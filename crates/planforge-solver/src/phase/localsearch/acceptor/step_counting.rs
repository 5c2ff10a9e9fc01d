//! Step counting hill climbing acceptor.

use std::fmt::Debug;

use planforge_core::{PlanforgeError, PlanningSolution, Result};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;

/// Which steps advance the counter of a [`StepCountingHillClimbingAcceptor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepCountingType {
    /// Every step.
    #[default]
    Step,
    /// Steps that score at least as well as the step before them.
    EqualOrImprovingStep,
    /// Steps that score better than the step before them.
    ImprovingStep,
}

/// Step counting hill climbing acceptor - accepts anything at least as good
/// as a threshold score that is only raised every `step_count_limit` steps.
///
/// The threshold starts at the phase's starting score. Once
/// `step_count_limit` counted steps have passed it becomes the score of the
/// step just taken, and counting starts over. Candidates that do not worsen
/// the last step are always accepted.
///
/// # Example
///
/// ```
/// use planforge_solver::{StepCountingHillClimbingAcceptor, StepCountingType};
/// use planforge_test::NQueensSolution;
///
/// let acceptor = StepCountingHillClimbingAcceptor::<NQueensSolution>::new(100)
///     .with_counting_type(StepCountingType::ImprovingStep);
/// assert_eq!(acceptor.step_count_limit(), 100);
/// ```
pub struct StepCountingHillClimbingAcceptor<S: PlanningSolution> {
    step_count_limit: u64,
    counting_type: StepCountingType,
    threshold_score: Option<S::Score>,
    last_step_score: Option<S::Score>,
    step_count: u64,
}

impl<S: PlanningSolution> Debug for StepCountingHillClimbingAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepCountingHillClimbingAcceptor")
            .field("step_count_limit", &self.step_count_limit)
            .field("counting_type", &self.counting_type)
            .field("step_count", &self.step_count)
            .finish()
    }
}

impl<S: PlanningSolution> StepCountingHillClimbingAcceptor<S> {
    /// Creates a new step counting hill climbing acceptor.
    ///
    /// # Arguments
    /// * `step_count_limit` - Counted steps between threshold updates
    pub fn new(step_count_limit: u64) -> Self {
        Self {
            step_count_limit,
            counting_type: StepCountingType::default(),
            threshold_score: None,
            last_step_score: None,
            step_count: 0,
        }
    }

    pub fn with_counting_type(mut self, counting_type: StepCountingType) -> Self {
        self.counting_type = counting_type;
        self
    }

    pub fn step_count_limit(&self) -> u64 {
        self.step_count_limit
    }

    pub fn threshold_score(&self) -> Option<S::Score> {
        self.threshold_score
    }

    fn counts(&self, step_score: &S::Score) -> bool {
        let Some(last_step_score) = self.last_step_score else {
            return true;
        };
        match self.counting_type {
            StepCountingType::Step => true,
            StepCountingType::EqualOrImprovingStep => *step_score >= last_step_score,
            StepCountingType::ImprovingStep => *step_score > last_step_score,
        }
    }
}

impl<S: PlanningSolution> Default for StepCountingHillClimbingAcceptor<S> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for StepCountingHillClimbingAcceptor<S> {
    fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        if self.step_count_limit == 0 {
            return Err(PlanforgeError::Config(
                "the step counting hill climbing size must be at least 1".to_string(),
            ));
        }
        self.threshold_score = Some(*starting_score);
        self.last_step_score = Some(*starting_score);
        self.step_count = 0;
        Ok(())
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        if candidate.score >= candidate.last_step_score {
            return true;
        }
        self.threshold_score
            .is_some_and(|threshold| candidate.score >= threshold)
    }

    fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        if self.counts(&outcome.score) {
            self.step_count += 1;
        }
        if self.step_count >= self.step_count_limit {
            self.threshold_score = Some(outcome.score);
            self.step_count = 0;
        }
        self.last_step_score = Some(outcome.score);
    }

    fn phase_ended(&mut self) {
        self.threshold_score = None;
        self.last_step_score = None;
        self.step_count = 0;
    }
}
