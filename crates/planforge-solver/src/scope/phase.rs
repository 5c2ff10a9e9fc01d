//! Phase-level scope.

use std::time::{Duration, Instant};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use super::SolverScope;

/// Borrows the solver scope for the duration of one phase and keeps the
/// phase's own step and score calculation counters.
pub struct PhaseScope<'a, S: PlanningSolution, D: ScoreDirector<S>> {
    solver_scope: &'a mut SolverScope<S, D>,
    phase_index: usize,
    step_count: u64,
    // Solver-wide calculation count when the phase began.
    calculation_count_offset: u64,
    started_at: Instant,
}

impl<'a, S: PlanningSolution, D: ScoreDirector<S>> PhaseScope<'a, S, D> {
    pub fn new(solver_scope: &'a mut SolverScope<S, D>, phase_index: usize) -> Self {
        let calculation_count_offset = solver_scope.calculation_count();
        Self {
            solver_scope,
            phase_index,
            step_count: 0,
            calculation_count_offset,
            started_at: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Counts a step in this phase and in the solver total.
    pub fn increment_step_count(&mut self) -> u64 {
        self.solver_scope.increment_step_count();
        self.step_count += 1;
        self.step_count
    }

    /// Score calculations made since the phase began.
    pub fn calculation_count(&self) -> u64 {
        self.solver_scope
            .calculation_count()
            .saturating_sub(self.calculation_count_offset)
    }

    /// Score calculations per second, 0 until a millisecond has passed.
    pub fn calculation_speed(&self) -> u64 {
        match self.elapsed().as_millis() as u64 {
            0 => 0,
            millis => self.calculation_count() * 1000 / millis,
        }
    }

    pub fn solver_scope(&self) -> &SolverScope<S, D> {
        self.solver_scope
    }

    pub fn score_director(&self) -> &D {
        self.solver_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        self.solver_scope.score_director_mut()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.solver_scope.calculate_score()
    }

    pub fn best_score(&self) -> Option<S::Score> {
        self.solver_scope.best_score().copied()
    }

    /// See [`SolverScope::update_best_solution`].
    pub fn update_best_solution(&mut self) -> bool {
        self.solver_scope.update_best_solution()
    }
}
