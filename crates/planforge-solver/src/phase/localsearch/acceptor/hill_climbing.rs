//! Hill climbing acceptor.

use planforge_core::PlanningSolution;

use super::{Acceptor, MoveCandidate};
use crate::heuristic::r#move::Move;

/// Hill climbing acceptor - accepts moves that do not worsen the score.
///
/// Equal moves are accepted so the search can cross plateaus. This can
/// still get stuck in local optima.
///
/// # Example
///
/// ```
/// use planforge_solver::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    /// Creates a new hill climbing acceptor.
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution, M: Move<S>> Acceptor<S, M> for HillClimbingAcceptor {
    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        candidate.score >= candidate.last_step_score
    }
}
