//! Composite acceptor.

use std::fmt::Debug;

use planforge_core::{PlanningSolution, Result};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::ProblemSize;

/// Accepts a candidate only if every child acceptor accepts it.
///
/// Used to combine several tabu families (entity, value, move, solution)
/// into one acceptor. Lifecycle calls go to every child in order.
pub struct CompositeAcceptor<S: PlanningSolution, M: Move<S>> {
    acceptors: Vec<Box<dyn Acceptor<S, M>>>,
}

impl<S: PlanningSolution, M: Move<S>> CompositeAcceptor<S, M> {
    pub fn new(acceptors: Vec<Box<dyn Acceptor<S, M>>>) -> Self {
        Self { acceptors }
    }

    pub fn len(&self) -> usize {
        self.acceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acceptors.is_empty()
    }
}

impl<S: PlanningSolution, M: Move<S>> Debug for CompositeAcceptor<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.acceptors.iter()).finish()
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for CompositeAcceptor<S, M> {
    fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        for acceptor in &mut self.acceptors {
            acceptor.phase_started(starting_score)?;
        }
        Ok(())
    }

    fn step_started(&mut self, problem_size: ProblemSize) {
        for acceptor in &mut self.acceptors {
            acceptor.step_started(problem_size);
        }
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        self.acceptors
            .iter_mut()
            .all(|acceptor| acceptor.is_accepted(candidate))
    }

    fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        for acceptor in &mut self.acceptors {
            acceptor.step_ended(outcome);
        }
    }

    fn phase_ended(&mut self) {
        for acceptor in &mut self.acceptors {
            acceptor.phase_ended();
        }
    }
}
