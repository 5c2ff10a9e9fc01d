//! Local search phase implementation.

use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info};

use planforge_core::{PlanningSolution, Result};
use planforge_scoring::ScoreDirector;

use super::{Acceptor, LocalSearchDecider, LocalSearchForager, StepOutcome};
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

/// Local search phase that improves an existing solution.
///
/// Each step:
/// 1. The decider evaluates candidates and picks the winner
/// 2. The winner's undo move is created and the winner is applied
/// 3. The best solution is updated if the step improved on it
/// 4. Acceptor and selector are told which step was taken
///
/// The phase ends when no candidate is accepted, a step or unimproved
/// step limit is hit, the time limit passes or a terminate flag is set.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
/// * `MS` - The move selector type
/// * `A` - The acceptor type
/// * `Fo` - The forager type
pub struct LocalSearchPhase<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
{
    decider: LocalSearchDecider<S, M, MS, A, Fo>,
    step_limit: Option<u64>,
    unimproved_step_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl<S, M, MS, A, Fo> LocalSearchPhase<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    Fo: LocalSearchForager<S>,
{
    /// Creates a new local search phase.
    pub fn new(move_selector: MS, acceptor: A, forager: Fo) -> Self {
        Self::with_decider(LocalSearchDecider::new(move_selector, acceptor, forager))
    }

    pub fn with_decider(decider: LocalSearchDecider<S, M, MS, A, Fo>) -> Self {
        Self {
            decider,
            step_limit: None,
            unimproved_step_limit: None,
            time_limit: None,
        }
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }

    /// Ends the phase after this many steps without a new best score.
    pub fn with_unimproved_step_limit(mut self, unimproved_step_limit: u64) -> Self {
        self.unimproved_step_limit = Some(unimproved_step_limit);
        self
    }

    /// Ends the phase once it has run for `time_limit`.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Verifies every undo move; see [`LocalSearchDecider::with_assert_undo_moves`].
    pub fn with_assert_undo_moves(mut self, assert_undo_moves: bool) -> Self {
        self.decider = self.decider.with_assert_undo_moves(assert_undo_moves);
        self
    }

    pub fn decider(&self) -> &LocalSearchDecider<S, M, MS, A, Fo> {
        &self.decider
    }

    fn run_steps<D: ScoreDirector<S>>(
        &mut self,
        phase_scope: &mut PhaseScope<'_, S, D>,
        starting_score: S::Score,
    ) -> Result<()> {
        let mut last_step_score = starting_score;
        let mut best_score = phase_scope.best_score().unwrap_or(starting_score);
        let mut unimproved_step_count = 0u64;

        loop {
            if phase_scope.solver_scope().should_terminate() {
                debug!(event = "terminated_early", steps = phase_scope.step_count());
                return Ok(());
            }
            if self
                .step_limit
                .is_some_and(|limit| phase_scope.step_count() >= limit)
            {
                return Ok(());
            }
            if self
                .unimproved_step_limit
                .is_some_and(|limit| unimproved_step_count >= limit)
            {
                return Ok(());
            }
            if self
                .time_limit
                .is_some_and(|limit| phase_scope.elapsed() >= limit)
            {
                return Ok(());
            }

            let step_index = phase_scope.step_count();
            let Some(decision) = self.decider.decide_next_step(
                phase_scope.score_director_mut(),
                step_index,
                last_step_score,
                best_score,
            )?
            else {
                debug!(event = "no_accepted_move", step = step_index);
                return Ok(());
            };

            let director = phase_scope.score_director_mut();
            let undo_step = decision.mov.create_undo_move(&*director);
            decision.mov.do_move(director);
            let step_score = director.calculate_score();
            last_step_score = step_score;

            if phase_scope.update_best_solution() {
                best_score = step_score;
                unimproved_step_count = 0;
            } else {
                unimproved_step_count += 1;
            }

            self.decider.step_ended(&StepOutcome {
                step_index,
                step: &decision.mov,
                undo_step: &undo_step,
                score: step_score,
                best_score,
                solution: phase_scope.score_director().working_solution(),
            });
            phase_scope.increment_step_count();

            debug!(
                event = "step",
                step = step_index,
                score = %step_score,
                best_score = %best_score,
                accepted_count = decision.accepted_count,
                selected_count = decision.selected_count,
            );
        }
    }
}

impl<S, M, MS, A, Fo> Debug for LocalSearchPhase<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: Debug,
    A: Debug,
    Fo: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("decider", &self.decider)
            .field("step_limit", &self.step_limit)
            .field("unimproved_step_limit", &self.unimproved_step_limit)
            .field("time_limit", &self.time_limit)
            .finish()
    }
}

impl<S, D, M, MS, A, Fo> Phase<S, D> for LocalSearchPhase<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    Fo: LocalSearchForager<S>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        let phase_index = solver_scope.next_phase_index();
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index);

        let starting_score = phase_scope.calculate_score();
        phase_scope.update_best_solution();

        info!(
            event = "phase_start",
            phase = "Local Search",
            phase_index = phase_scope.phase_index(),
            score = %starting_score,
        );

        self.decider.phase_started(&starting_score)?;
        let result = self.run_steps(&mut phase_scope, starting_score);
        self.decider.phase_ended();

        let duration = phase_scope.elapsed();
        let best_score = phase_scope
            .best_score()
            .map_or_else(|| "N/A".to_string(), |score| score.to_string());
        info!(
            event = "phase_end",
            phase = "Local Search",
            phase_index = phase_scope.phase_index(),
            duration_ms = duration.as_millis() as u64,
            steps = phase_scope.step_count(),
            speed = phase_scope.calculation_speed(),
            score = best_score,
        );
        result
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
