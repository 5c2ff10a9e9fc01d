//! Local search decider.
//!
//! Evaluates the candidates of one step and returns the winner. Each
//! candidate is applied to the working solution, scored, judged by the
//! acceptor while still applied, and then reverted with its undo move.

use std::fmt::Debug;
use std::marker::PhantomData;

use tracing::trace;

use planforge_core::{PlanforgeError, PlanningSolution, Result};
use planforge_scoring::ScoreDirector;

use super::{Acceptor, LocalSearchForager, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::{Move, MoveArena};
use crate::heuristic::selector::MoveSelector;

/// The move chosen for a step.
#[derive(Debug, Clone)]
pub struct StepDecision<S: PlanningSolution, M> {
    /// Index of the move among the step's candidates.
    pub index: usize,
    pub mov: M,
    /// Score of the working solution once `mov` is applied.
    pub score: S::Score,
    pub selected_count: u64,
    pub accepted_count: u64,
}

/// Picks one step at a time from a selector, an acceptor and a forager.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `M` - The move type
/// * `MS` - The move selector type
/// * `A` - The acceptor type
/// * `Fo` - The forager type
///
/// Candidates are pulled from the selector one at a time and kept in a
/// [`MoveArena`]; the forager refers to them by index and the winner is
/// moved out. Once the forager quits early no further candidate is
/// generated.
pub struct LocalSearchDecider<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
{
    move_selector: MS,
    acceptor: A,
    forager: Fo,
    arena: MoveArena<M>,
    /// Re-score after every undo and fail on a mismatch.
    assert_undo_moves: bool,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M, MS, A, Fo> LocalSearchDecider<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: MoveSelector<S, M>,
    A: Acceptor<S, M>,
    Fo: LocalSearchForager<S>,
{
    pub fn new(move_selector: MS, acceptor: A, forager: Fo) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            arena: MoveArena::new(),
            assert_undo_moves: false,
            _phantom: PhantomData,
        }
    }

    /// Enables the undo move corruption check.
    pub fn with_assert_undo_moves(mut self, assert_undo_moves: bool) -> Self {
        self.assert_undo_moves = assert_undo_moves;
        self
    }

    pub fn assert_undo_moves(&self) -> bool {
        self.assert_undo_moves
    }

    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }

    pub fn forager(&self) -> &Fo {
        &self.forager
    }

    pub fn phase_started(&mut self, starting_score: &S::Score) -> Result<()> {
        self.move_selector.phase_started();
        self.acceptor.phase_started(starting_score)
    }

    /// Evaluates the step's candidates and returns the forager's pick.
    ///
    /// The working solution is left as it was on entry. `last_step_score`
    /// must be the current score of the working solution.
    ///
    /// Returns `Ok(None)` if no candidate was accepted.
    pub fn decide_next_step<D: ScoreDirector<S>>(
        &mut self,
        score_director: &mut D,
        step_index: u64,
        last_step_score: S::Score,
        best_score: S::Score,
    ) -> Result<Option<StepDecision<S, M>>> {
        let problem_size = self.move_selector.problem_size(&*score_director);
        self.acceptor.step_started(problem_size);
        self.forager.step_started(best_score, last_step_score);

        self.arena.reset();
        let moves = self.move_selector.iter_moves(&*score_director);

        for (index, mov) in moves.enumerate() {
            self.arena.push(mov);
            let Some(mov) = self.arena.get(index) else {
                continue;
            };
            if !mov.is_doable(&*score_director) {
                continue;
            }

            let undo_move = mov.create_undo_move(&*score_director);
            mov.do_move(score_director);
            let score = score_director.calculate_score();
            let accepted = self.acceptor.is_accepted(&MoveCandidate {
                step_index,
                mov,
                score,
                last_step_score,
                best_score,
                solution: score_director.working_solution(),
            });
            undo_move.do_move(score_director);

            if self.assert_undo_moves {
                let restored = score_director.calculate_score();
                if restored != last_step_score {
                    return Err(PlanforgeError::UndoMoveCorrupted {
                        move_repr: format!("{mov:?}"),
                        expected: last_step_score.to_string(),
                        actual: restored.to_string(),
                    });
                }
            }

            trace!(
                event = "move",
                step = step_index,
                index,
                score = %score,
                accepted,
            );

            self.forager.add_move(index, score, accepted);
            if self.forager.is_quit_early() {
                break;
            }
        }

        let picked = self.forager.pick_move();
        Ok(picked.and_then(|(index, score)| {
            self.arena.take(index).map(|mov| StepDecision {
                index,
                mov,
                score,
                selected_count: self.forager.selected_count(),
                accepted_count: self.forager.accepted_count(),
            })
        }))
    }

    pub fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        self.acceptor.step_ended(outcome);
        self.move_selector.step_ended();
    }

    pub fn phase_ended(&mut self) {
        self.acceptor.phase_ended();
        self.move_selector.phase_ended();
    }
}

impl<S, M, MS, A, Fo> Debug for LocalSearchDecider<S, M, MS, A, Fo>
where
    S: PlanningSolution,
    M: Move<S>,
    MS: Debug,
    A: Debug,
    Fo: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchDecider")
            .field("move_selector", &self.move_selector)
            .field("acceptor", &self.acceptor)
            .field("forager", &self.forager)
            .field("assert_undo_moves", &self.assert_undo_moves)
            .finish()
    }
}
