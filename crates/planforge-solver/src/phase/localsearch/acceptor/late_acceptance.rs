//! Late acceptance acceptor.

use std::fmt::Debug;

use planforge_core::{PlanforgeError, PlanningSolution, Result};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;

/// Late acceptance acceptor - accepts moves that are at least as good as
/// the step taken `late_acceptance_size` steps ago.
///
/// Keeps a ring of step scores, filled with the starting score when the
/// phase starts. Step `i` compares against slot `i % size` and, once the
/// step is taken, overwrites that slot with the taken step's score (not
/// the best score).
///
/// # Example
///
/// ```
/// use planforge_solver::LateAcceptanceAcceptor;
/// use planforge_test::NQueensSolution;
///
/// let acceptor = LateAcceptanceAcceptor::<NQueensSolution>::new(400);
/// assert_eq!(acceptor.late_acceptance_size(), 400);
/// ```
pub struct LateAcceptanceAcceptor<S: PlanningSolution> {
    /// Size of the late acceptance ring.
    late_acceptance_size: usize,
    /// Also accept moves that do not worsen the last step score.
    hill_climbing_enabled: bool,
    /// Step scores, indexed by step index modulo the ring size.
    previous_scores: Vec<S::Score>,
}

impl<S: PlanningSolution> Debug for LateAcceptanceAcceptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LateAcceptanceAcceptor")
            .field("late_acceptance_size", &self.late_acceptance_size)
            .field("hill_climbing_enabled", &self.hill_climbing_enabled)
            .finish()
    }
}

impl<S: PlanningSolution> Clone for LateAcceptanceAcceptor<S> {
    fn clone(&self) -> Self {
        Self {
            late_acceptance_size: self.late_acceptance_size,
            hill_climbing_enabled: self.hill_climbing_enabled,
            previous_scores: self.previous_scores.clone(),
        }
    }
}

impl<S: PlanningSolution> LateAcceptanceAcceptor<S> {
    /// Creates a new late acceptance acceptor.
    ///
    /// # Arguments
    /// * `late_acceptance_size` - Number of step scores to remember
    pub fn new(late_acceptance_size: usize) -> Self {
        Self {
            late_acceptance_size,
            hill_climbing_enabled: false,
            previous_scores: Vec::new(),
        }
    }

    /// Also accepts candidates at least as good as the last step.
    pub fn with_hill_climbing(mut self, hill_climbing_enabled: bool) -> Self {
        self.hill_climbing_enabled = hill_climbing_enabled;
        self
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }

    fn slot(&self, step_index: u64) -> Option<usize> {
        let ring_len = self.previous_scores.len() as u64;
        step_index.checked_rem(ring_len).map(|slot| slot as usize)
    }
}

impl<S: PlanningSolution> Default for LateAcceptanceAcceptor<S> {
    fn default() -> Self {
        Self::new(400)
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for LateAcceptanceAcceptor<S> {
    fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        if self.late_acceptance_size == 0 {
            return Err(PlanforgeError::Config(
                "the late acceptance size must be at least 1".to_string(),
            ));
        }
        self.previous_scores = vec![*starting_score; self.late_acceptance_size];
        Ok(())
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        let Some(late_score) = self
            .slot(candidate.step_index)
            .and_then(|slot| self.previous_scores.get(slot))
        else {
            return false;
        };
        if candidate.score >= *late_score {
            return true;
        }
        self.hill_climbing_enabled && candidate.score >= candidate.last_step_score
    }

    fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        if let Some(slot) = self.slot(outcome.step_index) {
            self.previous_scores[slot] = outcome.score;
        }
    }

    fn phase_ended(&mut self) {
        self.previous_scores.clear();
    }
}
