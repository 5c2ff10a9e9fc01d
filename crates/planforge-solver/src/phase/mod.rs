//! Phases: the units a solve is made of.
//!
//! [`localsearch`] improves one solution step by step; [`partitioned`]
//! splits it and runs a local search per part on worker threads.

pub mod localsearch;
pub mod partitioned;

use std::fmt::Debug;

use planforge_core::{PlanningSolution, Result};
use planforge_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// Something that works on the scope's working solution until it decides
/// to stop, reporting every new best solution through the scope.
///
/// On `Err` the phase stops; whatever best solution the scope holds at
/// that point is still valid.
pub trait Phase<S: PlanningSolution, D: ScoreDirector<S>>: Send + Debug {
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()>;

    /// Short name used in log events.
    fn phase_type_name(&self) -> &'static str;
}

/// Runs the phases in order, stopping early once the solve should end.
impl<S, D, P> Phase<S, D> for Vec<P>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    P: Phase<S, D>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        for phase in self.iter_mut() {
            if solver_scope.should_terminate() {
                break;
            }
            phase.solve(solver_scope)?;
        }
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Sequence"
    }
}
