//! Union move selector combinator.
//!
//! Combines moves from two selectors into a single stream.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;
use rand::rngs::StdRng;
use rand::Rng;

use super::seeded_rng;
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::{MoveSelector, ProblemSize, SelectionOrder};

/// Combines moves from two selectors into a single stream.
///
/// With [`SelectionOrder::Original`] it yields all moves from the first
/// selector, then all moves from the second. With
/// [`SelectionOrder::Random`] each next move is drawn from the first
/// selector with probability `first_weight / (first_weight + second_weight)`
/// until one side runs dry. Both selectors must produce the same move
/// type; wrap heterogenous moves in an `EitherMove`.
pub struct UnionMoveSelector<S, M, A, B> {
    first: A,
    second: B,
    order: SelectionOrder,
    first_probability: f64,
    rng: StdRng,
    _phantom: PhantomData<fn() -> (S, M)>,
}

impl<S, M, A, B> UnionMoveSelector<S, M, A, B> {
    /// Creates a union that concatenates the two selectors.
    ///
    /// # Arguments
    /// * `first` - The first selector (yields moves first)
    /// * `second` - The second selector (yields moves after first is exhausted)
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            order: SelectionOrder::Original,
            first_probability: 0.5,
            rng: seeded_rng(None),
            _phantom: PhantomData,
        }
    }

    /// Creates a union that randomly interleaves the two selectors.
    ///
    /// Non-positive or NaN weights count as zero; zero on both sides, or
    /// infinity on both sides, falls back to an even split.
    pub fn random(first: A, second: B, first_weight: f64, second_weight: f64, seed: u64) -> Self {
        let first_weight = first_weight.max(0.0);
        let second_weight = second_weight.max(0.0);
        let first_probability = match (first_weight.is_infinite(), second_weight.is_infinite()) {
            (true, true) => 0.5,
            (true, false) => 1.0,
            (false, true) => 0.0,
            _ if first_weight + second_weight > 0.0 => {
                first_weight / (first_weight + second_weight)
            }
            _ => 0.5,
        };
        Self {
            first,
            second,
            order: SelectionOrder::Random,
            first_probability,
            rng: seeded_rng(Some(seed)),
            _phantom: PhantomData,
        }
    }

    /// Returns the selection order.
    pub fn order(&self) -> SelectionOrder {
        self.order
    }
}

impl<S, M, A: Debug, B: Debug> Debug for UnionMoveSelector<S, M, A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionMoveSelector")
            .field("first", &self.first)
            .field("second", &self.second)
            .field("order", &self.order)
            .finish()
    }
}

impl<S, M, A, B> MoveSelector<S, M> for UnionMoveSelector<S, M, A, B>
where
    S: PlanningSolution,
    M: Move<S>,
    A: MoveSelector<S, M>,
    B: MoveSelector<S, M>,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = M> + 'a> {
        let random = self.order.is_random();
        let first_probability = self.first_probability;
        let rng = &mut self.rng;
        let mut first = self.first.iter_moves(score_director).fuse();
        let mut second = self.second.iter_moves(score_director).fuse();

        Box::new(std::iter::from_fn(move || {
            if random && !rng.random_bool(first_probability) {
                second.next().or_else(|| first.next())
            } else {
                first.next().or_else(|| second.next())
            }
        }))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.first.size(score_director) + self.second.size(score_director)
    }

    fn problem_size<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemSize {
        let first = self.first.problem_size(score_director);
        let second = self.second.problem_size(score_director);
        ProblemSize {
            entity_count: first.entity_count.max(second.entity_count),
            value_count: first.value_count.max(second.value_count),
        }
    }

    fn phase_started(&mut self) {
        self.first.phase_started();
        self.second.phase_started();
    }

    fn step_ended(&mut self) {
        self.first.step_ended();
        self.second.step_ended();
    }

    fn phase_ended(&mut self) {
        self.first.phase_ended();
        self.second.phase_ended();
    }
}
