//! Director that scores from scratch.

use planforge_core::PlanningSolution;

use super::traits::ScoreDirector;

/// Recalculates the whole score with a user function.
///
/// The last score is kept until a variable change or a new working
/// solution invalidates it, so repeated `calculate_score` calls on an
/// unchanged solution are free and are not counted.
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    solution: S,
    calculator: C,
    last_score: Option<S::Score>,
    calculation_count: u64,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send,
{
    pub fn new(solution: S, calculator: C) -> Self {
        Self {
            solution,
            calculator,
            last_score: None,
            calculation_count: 0,
        }
    }

    pub fn into_working_solution(self) -> S {
        self.solution
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send,
{
    fn working_solution(&self) -> &S {
        &self.solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.last_score = None;
        &mut self.solution
    }

    fn calculate_score(&mut self) -> S::Score {
        if let Some(score) = self.last_score {
            return score;
        }
        let score = (self.calculator)(&self.solution);
        self.solution.set_score(Some(score));
        self.last_score = Some(score);
        self.calculation_count += 1;
        score
    }

    fn set_working_solution(&mut self, solution: S) {
        self.solution = solution;
        self.last_score = None;
    }

    fn before_variable_changed(&mut self, _descriptor: usize, _entity: usize, _variable: &str) {
        self.last_score = None;
    }

    fn after_variable_changed(&mut self, _descriptor: usize, _entity: usize, _variable: &str) {}

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }
}
