//! Scopes for solver, phase and step state.

mod phase;
mod solver;


pub use phase::PhaseScope;
pub use solver::{BestSolutionListener, SolverScope};
