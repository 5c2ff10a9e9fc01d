//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

/// Callback invoked with every new best solution and its score.
pub type BestSolutionListener<S> =
    Box<dyn FnMut(&S, <S as PlanningSolution>::Score) + Send>;

/// State shared by every phase of one solve: the score director, the
/// best solution so far, the clock and the termination signals.
pub struct SolverScope<S: PlanningSolution, D: ScoreDirector<S>> {
    score_director: D,
    best_solution: Option<S>,
    best_score: Option<S::Score>,
    start_time: Option<Instant>,
    time_limit: Option<Duration>,
    total_step_count: u64,
    phase_count: usize,
    terminate_flags: Vec<Arc<AtomicBool>>,
    best_solution_listener: Option<BestSolutionListener<S>>,
}

impl<S: PlanningSolution, D: ScoreDirector<S>> SolverScope<S, D> {
    pub fn new(score_director: D) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            start_time: None,
            time_limit: None,
            total_step_count: 0,
            phase_count: 0,
            terminate_flags: Vec::new(),
            best_solution_listener: None,
        }
    }

    /// Stops every phase once `limit` has elapsed since `start_solving`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_best_solution_listener(mut self, listener: BestSolutionListener<S>) -> Self {
        self.best_solution_listener = Some(listener);
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.phase_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    /// Returns the time left before the time limit, if one is set.
    pub fn remaining_time(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed().unwrap_or_default()))
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&S::Score> {
        self.best_score.as_ref()
    }

    /// Records the working solution as best if it beats the current best.
    ///
    /// Returns true if the best solution changed.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score > *best,
        };

        if is_better {
            let solution = self.score_director.clone_working_solution();
            if let Some(listener) = self.best_solution_listener.as_mut() {
                listener(&solution, current_score);
            }
            self.best_solution = Some(solution);
            self.best_score = Some(current_score);
        }
        is_better
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Returns the index of a phase that is starting and counts it.
    pub fn next_phase_index(&mut self) -> usize {
        let phase_index = self.phase_count;
        self.phase_count += 1;
        phase_index
    }

    /// Number of phases started since `start_solving`.
    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    pub fn calculation_count(&self) -> u64 {
        self.score_director.calculation_count()
    }

    pub fn take_best_or_working_solution(self) -> S {
        self.best_solution
            .unwrap_or_else(|| self.score_director.clone_working_solution())
    }

    /// Adds a flag that, once set, terminates the running phase early.
    pub fn add_terminate_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_flags.push(flag);
    }

    pub fn terminate_flags(&self) -> &[Arc<AtomicBool>] {
        &self.terminate_flags
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_flags
            .iter()
            .any(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn is_time_limit_reached(&self) -> bool {
        self.remaining_time().is_some_and(|left| left.is_zero())
    }

    /// Returns true if a terminate flag is set or the time limit passed.
    pub fn should_terminate(&self) -> bool {
        self.is_terminate_early() || self.is_time_limit_reached()
    }
}
