//! Probability move selector decorator.
//!
//! Orders moves from an inner selector by weighted random sampling.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use super::seeded_rng;
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;

/// Samples moves from an inner selector without replacement, weighted.
///
/// A move with a higher weight tends to come earlier. Moves with a
/// non-positive (or NaN) weight are never yielded. Uses weighted reservoir
/// keys (`u^(1/w)`), so one step costs one random draw per move and a sort.
pub struct ProbabilityMoveSelector<S, M, Inner> {
    inner: Inner,
    weight_fn: fn(&M) -> f64,
    rng: StdRng,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, M, Inner> ProbabilityMoveSelector<S, M, Inner> {
    pub fn new(inner: Inner, weight_fn: fn(&M) -> f64) -> Self {
        Self::seeded(inner, weight_fn, None)
    }

    pub fn with_seed(inner: Inner, weight_fn: fn(&M) -> f64, seed: u64) -> Self {
        Self::seeded(inner, weight_fn, Some(seed))
    }

    fn seeded(inner: Inner, weight_fn: fn(&M) -> f64, seed: Option<u64>) -> Self {
        Self {
            inner,
            weight_fn,
            rng: seeded_rng(seed),
            _phantom: PhantomData,
        }
    }
}

impl<S, M, Inner: Debug> Debug for ProbabilityMoveSelector<S, M, Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProbabilityMoveSelector").field(&self.inner).finish()
    }
}

impl<S, M, Inner> MoveSelector<S, M> for ProbabilityMoveSelector<S, M, Inner>
where
    S: PlanningSolution,
    M: Move<S>,
    Inner: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let weight_fn = self.weight_fn;
        let rng = &mut self.rng;
        let mut keyed: Vec<(f64, M)> = self
            .inner
            .iter_moves(score_director)
            .filter_map(|m| {
                let weight = weight_fn(&m);
                if weight > 0.0 {
                    let u: f64 = rng.random();
                    Some((u.powf(1.0 / weight), m))
                } else {
                    None
                }
            })
            .collect();
        keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
        Box::new(keyed.into_iter().map(|(_, m)| m))
    }

    delegate_to_inner!();
}
