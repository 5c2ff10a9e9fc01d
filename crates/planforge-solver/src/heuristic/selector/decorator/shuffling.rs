//! Random reordering of a selector's moves.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::seeded_rng;
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;

/// Yields every move of the inner selector once per step, in a fresh
/// random permutation each step.
pub struct ShufflingMoveSelector<S, M, Inner> {
    inner: Inner,
    rng: StdRng,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, Inner> ShufflingMoveSelector<S, M, Inner> {
    pub fn new(inner: Inner) -> Self {
        Self::seeded(inner, None)
    }

    /// Same permutations on every run for a given seed.
    pub fn with_seed(inner: Inner, seed: u64) -> Self {
        Self::seeded(inner, Some(seed))
    }

    fn seeded(inner: Inner, seed: Option<u64>) -> Self {
        Self {
            inner,
            rng: seeded_rng(seed),
            _phantom: PhantomData,
        }
    }
}

impl<S, M, Inner: Debug> Debug for ShufflingMoveSelector<S, M, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShufflingMoveSelector").field(&self.inner).finish()
    }
}

impl<S, M, Inner> MoveSelector<S, M> for ShufflingMoveSelector<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let mut moves: Vec<M> = self.inner.iter_moves(score_director).collect();
        moves.shuffle(&mut self.rng);
        Box::new(moves.into_iter())
    }

    delegate_to_inner!();
}
