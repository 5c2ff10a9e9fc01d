//! The problem a solver works on.

use crate::score::Score;

/// A problem instance together with its current assignment and score.
///
/// Everything else about the solution, its entities and how their
/// variables are read or written, is reached through function pointers
/// handed to moves and selectors, so this trait stays small.
///
/// ```
/// use planforge_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Seating {
///     table_of_guest: Vec<Option<usize>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Seating {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<SimpleScore> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<SimpleScore>) {
///         self.score = score;
///     }
/// }
/// ```
///
/// `Send + Sync` because partitions of a solution are solved on their
/// own threads.
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    type Score: Score;

    /// `None` until a director has calculated it.
    fn score(&self) -> Option<Self::Score>;

    fn set_score(&mut self, score: Option<Self::Score>);
}
