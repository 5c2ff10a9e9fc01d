//! Acceptors for local search move acceptance.
//!
//! An acceptor decides whether a candidate move may become the next step.
//! The decider queries it while the candidate is applied to the working
//! solution, so [`MoveCandidate::solution`] is the post-move state.

mod composite;
mod great_deluge;
mod hill_climbing;
mod late_acceptance;
mod simulated_annealing;
mod step_counting;
mod tabu;

use std::fmt::Debug;

use planforge_core::{PlanningSolution, Result};

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::ProblemSize;

pub use composite::CompositeAcceptor;
pub use great_deluge::GreatDelugeAcceptor;
pub use hill_climbing::HillClimbingAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use step_counting::{StepCountingHillClimbingAcceptor, StepCountingType};
pub use tabu::{
    EntityTabuAcceptor, EntityTabuKeys, MoveTabuAcceptor, MoveTabuKeys, SolutionTabuAcceptor,
    SolutionTabuKeys, TabuAcceptor, TabuKeySource, TabuSizeStrategy, UndoMovePolicy,
    ValueTabuAcceptor, ValueTabuKeys,
};

/// A candidate move offered to an acceptor.
pub struct MoveCandidate<'a, S: PlanningSolution, M> {
    /// Index of the step being decided (0-based within the phase).
    pub step_index: u64,
    /// The candidate move.
    pub mov: &'a M,
    /// Score of the working solution with the move applied.
    pub score: S::Score,
    /// Score of the last completed step (the phase start score at step 0).
    pub last_step_score: S::Score,
    /// Best score found so far.
    pub best_score: S::Score,
    /// The working solution with the move applied.
    pub solution: &'a S,
}

/// The step taken at the end of a step.
pub struct StepOutcome<'a, S: PlanningSolution, M> {
    pub step_index: u64,
    pub step: &'a M,
    /// Undo move of `step`, created before it was applied.
    pub undo_step: &'a M,
    pub score: S::Score,
    /// Best score including this step.
    pub best_score: S::Score,
    /// The working solution after the step.
    pub solution: &'a S,
}

/// Trait for accepting or rejecting moves in local search.
///
/// Acceptors implement different strategies for escaping local optima,
/// such as tabu search or late acceptance. The trait is object safe so
/// configured acceptors can be boxed.
pub trait Acceptor<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Called when a phase starts.
    ///
    /// Resets all per-phase state. Invalid settings are reported here.
    fn phase_started(&mut self, _starting_score: &S::Score) -> Result<()> {
        Ok(())
    }

    /// Called when a step starts, with the size of the working solution.
    fn step_started(&mut self, _problem_size: ProblemSize) {}

    /// Returns true if the candidate may become the next step.
    ///
    /// Asking twice about the same candidate within one step gives the same
    /// answer, except for the random draw inside a fading tabu band.
    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool;

    /// Called when a step ends with the step that was taken.
    fn step_ended(&mut self, _outcome: &StepOutcome<'_, S, M>) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for Box<dyn Acceptor<S, M>> {
    fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        (**self).phase_started(starting_score)
    }

    fn step_started(&mut self, problem_size: ProblemSize) {
        (**self).step_started(problem_size);
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        (**self).is_accepted(candidate)
    }

    fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        (**self).step_ended(outcome);
    }

    fn phase_ended(&mut self) {
        (**self).phase_ended();
    }
}

#[cfg(test)]
mod tests;
