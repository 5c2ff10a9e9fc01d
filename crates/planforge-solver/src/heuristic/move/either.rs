//! EitherMove - a change or a swap on the same variable.
//!
//! Lets one selector (for example a union of a change selector and a swap
//! selector) yield a single concrete move type.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use super::traits::PlanningValues;
use super::{ChangeMove, Move, SwapMove};

/// A change move or a swap move.
pub enum EitherMove<S, V> {
    Change(ChangeMove<S, V>),
    Swap(SwapMove<S, V>),
}

impl<S, V: Clone> Clone for EitherMove<S, V> {
    fn clone(&self) -> Self {
        match self {
            EitherMove::Change(m) => EitherMove::Change(m.clone()),
            EitherMove::Swap(m) => EitherMove::Swap(m.clone()),
        }
    }
}

impl<S, V: PartialEq> PartialEq for EitherMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EitherMove::Change(a), EitherMove::Change(b)) => a == b,
            (EitherMove::Swap(a), EitherMove::Swap(b)) => a == b,
            _ => false,
        }
    }
}

impl<S, V: Eq> Eq for EitherMove<S, V> {}

impl<S, V: Hash> Hash for EitherMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            EitherMove::Change(m) => {
                0u8.hash(state);
                m.hash(state);
            }
            EitherMove::Swap(m) => {
                1u8.hash(state);
                m.hash(state);
            }
        }
    }
}

impl<S, V: Debug> Debug for EitherMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EitherMove::Change(m) => m.fmt(f),
            EitherMove::Swap(m) => m.fmt(f),
        }
    }
}

impl<S, V> From<ChangeMove<S, V>> for EitherMove<S, V> {
    fn from(m: ChangeMove<S, V>) -> Self {
        EitherMove::Change(m)
    }
}

impl<S, V> From<SwapMove<S, V>> for EitherMove<S, V> {
    fn from(m: SwapMove<S, V>) -> Self {
        EitherMove::Swap(m)
    }
}

impl<S, V> Move<S> for EitherMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        match self {
            EitherMove::Change(m) => m.is_doable(score_director),
            EitherMove::Swap(m) => m.is_doable(score_director),
        }
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        match self {
            EitherMove::Change(m) => EitherMove::Change(m.create_undo_move(score_director)),
            EitherMove::Swap(m) => EitherMove::Swap(m.create_undo_move(score_director)),
        }
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        match self {
            EitherMove::Change(m) => m.do_move(score_director),
            EitherMove::Swap(m) => m.do_move(score_director),
        }
    }

    fn descriptor_index(&self) -> usize {
        match self {
            EitherMove::Change(m) => m.descriptor_index(),
            EitherMove::Swap(m) => m.descriptor_index(),
        }
    }

    fn entity_indices(&self) -> &[usize] {
        match self {
            EitherMove::Change(m) => m.entity_indices(),
            EitherMove::Swap(m) => m.entity_indices(),
        }
    }

    fn planning_values(&self, solution: &S) -> PlanningValues {
        match self {
            EitherMove::Change(m) => m.planning_values(solution),
            EitherMove::Swap(m) => m.planning_values(solution),
        }
    }

    fn variable_name(&self) -> &str {
        match self {
            EitherMove::Change(m) => m.variable_name(),
            EitherMove::Swap(m) => m.variable_name(),
        }
    }
}
