//! Filtering move selector decorator.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;

/// Drops moves for which `filter(solution, move)` returns false.
///
/// The predicate sees a copy of the working solution taken when the step
/// starts, so moves done while the step evaluates candidates do not leak in.
pub struct FilteringMoveSelector<S, M, Inner, F> {
    inner: Inner,
    filter: F,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, Inner, F> FilteringMoveSelector<S, M, Inner, F>
where
    F: Fn(&S, &M) -> bool + Send,
{
    /// Creates a new filtering selector.
    pub fn new(inner: Inner, filter: F) -> Self {
        Self {
            inner,
            filter,
            _phantom: PhantomData,
        }
    }
}

impl<S, M, Inner: Debug, F> Debug for FilteringMoveSelector<S, M, Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteringMoveSelector")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<S, M, Inner, F> MoveSelector<S, M> for FilteringMoveSelector<S, M, Inner, F>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: MoveSelector<S, M>,
    F: Fn(&S, &M) -> bool + Send,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let filter = &self.filter;
        let solution = score_director.working_solution().clone();
        Box::new(
            self.inner
                .iter_moves(score_director)
                .filter(move |m| filter(&solution, m)),
        )
    }

    delegate_to_inner!();
}
