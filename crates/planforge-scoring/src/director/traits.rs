//! The contract between moves and score calculation.

use planforge_core::PlanningSolution;

/// Owns the working solution of one solver thread and scores it.
///
/// Moves never write to a solution directly: they go through the
/// director, announcing every planning variable write with
/// [`before_variable_changed`](Self::before_variable_changed) and
/// [`after_variable_changed`](Self::after_variable_changed) so an
/// incremental implementation can keep its score in step.
pub trait ScoreDirector<S: PlanningSolution>: Send {
    fn working_solution(&self) -> &S;

    /// Writes through this reference must be bracketed by the variable
    /// change notifications.
    fn working_solution_mut(&mut self) -> &mut S;

    /// Scores the working solution and stores the score on it.
    fn calculate_score(&mut self) -> S::Score;

    fn clone_working_solution(&self) -> S {
        self.working_solution().clone()
    }

    /// Swaps in a whole new working solution; the next score is recalculated.
    fn set_working_solution(&mut self, solution: S);

    fn before_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    fn after_variable_changed(
        &mut self,
        descriptor_index: usize,
        entity_index: usize,
        variable_name: &str,
    );

    /// Number of score calculations so far.
    fn calculation_count(&self) -> u64 {
        0
    }
}
