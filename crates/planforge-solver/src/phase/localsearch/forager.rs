//! Foragers for local search move selection
//!
//! Foragers see every evaluated candidate of a step, decide when the
//! decider may stop evaluating, and pick the step's winner. Candidates are
//! referenced by their index in the step's move arena.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_config::PickEarlyType;
use planforge_core::PlanningSolution;

/// Trait for collecting and selecting moves in local search.
///
/// Foragers are responsible for:
/// - Collecting evaluated moves during a step
/// - Deciding when to quit evaluating early
/// - Selecting the winning move
///
/// # Type Parameters
/// * `S` - The planning solution type
pub trait LocalSearchForager<S: PlanningSolution>: Send + Debug {
    /// Called at the start of each step to reset state.
    fn step_started(&mut self, best_score: S::Score, last_step_score: S::Score);

    /// Records an evaluated candidate and the acceptor's verdict.
    fn add_move(&mut self, index: usize, score: S::Score, accepted: bool);

    /// Returns true if no further candidates need to be evaluated.
    fn is_quit_early(&self) -> bool;

    /// Picks the winning move of the step.
    ///
    /// Returns None if no move was accepted.
    fn pick_move(&mut self) -> Option<(usize, S::Score)>;

    /// Candidates evaluated in the current step.
    fn selected_count(&self) -> u64;

    /// Candidates accepted in the current step.
    fn accepted_count(&self) -> u64;
}

/// A forager that keeps the best accepted move.
///
/// Evaluation stops once `accepted_count_limit` moves were accepted, or as
/// soon as a move satisfies the pick early rule. Among the accepted moves
/// the highest score wins and ties go to the first one seen.
///
/// # Example
///
/// ```
/// use planforge_solver::{AcceptedForager, LocalSearchForager};
/// use planforge_core::SimpleScore;
/// use planforge_test::NQueensSolution;
///
/// let mut forager = AcceptedForager::<NQueensSolution>::best_of(2);
/// forager.step_started(SimpleScore::of(0), SimpleScore::of(-5));
/// forager.add_move(0, SimpleScore::of(-7), true);
/// forager.add_move(1, SimpleScore::of(-6), true);
/// assert!(forager.is_quit_early());
/// assert_eq!(forager.pick_move(), Some((1, SimpleScore::of(-6))));
/// ```
pub struct AcceptedForager<S: PlanningSolution> {
    /// Stop after this many accepted moves.
    accepted_count_limit: usize,
    pick_early_type: PickEarlyType,
    best_score: Option<S::Score>,
    last_step_score: Option<S::Score>,
    /// Best accepted candidate so far.
    finalist: Option<(usize, S::Score)>,
    early_pick: Option<(usize, S::Score)>,
    selected_count: u64,
    accepted_count: u64,
    _phantom: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution> AcceptedForager<S> {
    /// Creates a new forager.
    ///
    /// # Arguments
    /// * `accepted_count_limit` - Stop after this many accepted moves
    ///   (`usize::MAX` for no limit)
    /// * `pick_early_type` - When a single accepted move ends the step
    pub fn new(accepted_count_limit: usize, pick_early_type: PickEarlyType) -> Self {
        Self {
            accepted_count_limit: accepted_count_limit.max(1),
            pick_early_type,
            best_score: None,
            last_step_score: None,
            finalist: None,
            early_pick: None,
            selected_count: 0,
            accepted_count: 0,
            _phantom: PhantomData,
        }
    }

    /// Takes the first accepted move that improves on the last step.
    pub fn first_improving() -> Self {
        Self::new(usize::MAX, PickEarlyType::FirstLastStepScoreImproving)
    }

    /// Takes the best of the first `n` accepted moves.
    pub fn best_of(n: usize) -> Self {
        Self::new(n, PickEarlyType::Never)
    }

    /// Takes the first accepted move.
    pub fn first_accepted() -> Self {
        Self::new(1, PickEarlyType::Never)
    }

    pub fn accepted_count_limit(&self) -> usize {
        self.accepted_count_limit
    }

    pub fn pick_early_type(&self) -> PickEarlyType {
        self.pick_early_type
    }

    fn picks_early(&self, score: &S::Score) -> bool {
        match self.pick_early_type {
            PickEarlyType::Never => false,
            PickEarlyType::FirstBestScoreImproving => {
                self.best_score.is_some_and(|best| *score > best)
            }
            PickEarlyType::FirstLastStepScoreImproving => {
                self.last_step_score.is_some_and(|last| *score > last)
            }
        }
    }
}

impl<S: PlanningSolution> Clone for AcceptedForager<S> {
    fn clone(&self) -> Self {
        Self::new(self.accepted_count_limit, self.pick_early_type)
    }
}

impl<S: PlanningSolution> Debug for AcceptedForager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcceptedForager")
            .field("accepted_count_limit", &self.accepted_count_limit)
            .field("pick_early_type", &self.pick_early_type)
            .field("accepted_count", &self.accepted_count)
            .finish()
    }
}

impl<S: PlanningSolution> LocalSearchForager<S> for AcceptedForager<S> {
    fn step_started(&mut self, best_score: S::Score, last_step_score: S::Score) {
        self.best_score = Some(best_score);
        self.last_step_score = Some(last_step_score);
        self.finalist = None;
        self.early_pick = None;
        self.selected_count = 0;
        self.accepted_count = 0;
    }

    fn add_move(&mut self, index: usize, score: S::Score, accepted: bool) {
        self.selected_count += 1;
        if !accepted {
            return;
        }
        self.accepted_count += 1;

        if self.early_pick.is_none() && self.picks_early(&score) {
            self.early_pick = Some((index, score));
        }
        // Strictly better only: ties keep the first seen.
        if self.finalist.map_or(true, |(_, best)| score > best) {
            self.finalist = Some((index, score));
        }
    }

    fn is_quit_early(&self) -> bool {
        self.early_pick.is_some() || self.accepted_count >= self.accepted_count_limit as u64
    }

    fn pick_move(&mut self) -> Option<(usize, S::Score)> {
        self.early_pick.take().or(self.finalist.take())
    }

    fn selected_count(&self) -> u64 {
        self.selected_count
    }

    fn accepted_count(&self) -> u64 {
        self.accepted_count
    }
}
