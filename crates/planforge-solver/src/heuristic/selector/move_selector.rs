//! The selector trait and the two basic selectors over one variable.

use std::fmt::Debug;
use std::hash::Hash;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::{ChangeMove, Move, SwapMove};

/// How many entities and values the selected moves range over.
///
/// Ratio based tabu sizes are resolved against these counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemSize {
    pub entity_count: usize,
    pub value_count: usize,
}

/// Enumerates the candidate moves of one step.
///
/// Selectors take `&mut self` when iterating so that random ones can
/// draw from their own generator. A returned iterator lives no longer
/// than the step that asked for it and does not borrow the director, so
/// candidates can be done and undone while it is still being pulled.
pub trait MoveSelector<S: PlanningSolution, M: Move<S>>: Send + Debug {
    /// Starts a fresh, finite sequence of candidates.
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = M> + 'a>;

    /// Upper bound on the length of one sequence.
    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize;

    /// Entity and value counts of the working solution, zero if unknown.
    fn problem_size<D: ScoreDirector<S>>(&self, _score_director: &D) -> ProblemSize {
        ProblemSize::default()
    }

    fn phase_started(&mut self) {}

    fn step_ended(&mut self) {}

    fn phase_ended(&mut self) {}
}

/// How a selector reaches one planning variable of one entity class.
struct VariableAccess<S, V> {
    entity_count: fn(&S) -> usize,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    descriptor_index: usize,
    variable_name: &'static str,
}

impl<S, V> Clone for VariableAccess<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for VariableAccess<S, V> {}

impl<S, V> VariableAccess<S, V> {
    fn entity_count(&self, solution: &S) -> usize {
        (self.entity_count)(solution)
    }

    fn change(&self, entity_index: usize, value: V) -> ChangeMove<S, V> {
        ChangeMove::new(
            entity_index,
            Some(value),
            self.getter,
            self.setter,
            self.variable_name,
            self.descriptor_index,
        )
    }

    fn swap(&self, left: usize, right: usize) -> SwapMove<S, V> {
        SwapMove::new(
            left,
            right,
            self.getter,
            self.setter,
            self.variable_name,
            self.descriptor_index,
        )
    }
}

/// Every entity paired with every value, entity by entity.
pub struct ChangeMoveSelector<S, V> {
    access: VariableAccess<S, V>,
    values: Vec<V>,
}

impl<S, V> ChangeMoveSelector<S, V> {
    /// `values` is the value range, tried in the given order for each entity.
    pub fn new(
        entity_count: fn(&S) -> usize,
        values: Vec<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        descriptor_index: usize,
        variable_name: &'static str,
    ) -> Self {
        Self {
            access: VariableAccess {
                entity_count,
                getter,
                setter,
                descriptor_index,
                variable_name,
            },
            values,
        }
    }
}

impl<S, V: Debug> Debug for ChangeMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("variable_name", &self.access.variable_name)
            .field("values", &self.values)
            .finish()
    }
}

impl<S, V> MoveSelector<S, ChangeMove<S, V>> for ChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = ChangeMove<S, V>> + 'a> {
        let access = self.access;
        let values = &self.values;
        let entities = 0..access.entity_count(score_director.working_solution());
        Box::new(entities.flat_map(move |entity| {
            values.iter().map(move |v| access.change(entity, v.clone()))
        }))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        self.access.entity_count(score_director.working_solution()) * self.values.len()
    }

    fn problem_size<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemSize {
        ProblemSize {
            entity_count: self.access.entity_count(score_director.working_solution()),
            value_count: self.values.len(),
        }
    }
}

/// Every unordered pair of distinct entities, once, as `(i, j)` with `i < j`.
pub struct SwapMoveSelector<S, V> {
    access: VariableAccess<S, V>,
}

impl<S, V> SwapMoveSelector<S, V> {
    pub fn new(
        entity_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        descriptor_index: usize,
        variable_name: &'static str,
    ) -> Self {
        Self {
            access: VariableAccess {
                entity_count,
                getter,
                setter,
                descriptor_index,
                variable_name,
            },
        }
    }
}

impl<S, V> Debug for SwapMoveSelector<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapMoveSelector")
            .field("variable_name", &self.access.variable_name)
            .finish()
    }
}

impl<S, V> MoveSelector<S, SwapMove<S, V>> for SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn iter_moves<'a, D: ScoreDirector<S>>(
        &'a mut self,
        score_director: &D,
    ) -> Box<dyn Iterator<Item = SwapMove<S, V>> + 'a> {
        let access = self.access;
        let n = access.entity_count(score_director.working_solution());
        Box::new((0..n).flat_map(move |left| {
            ((left + 1)..n).map(move |right| access.swap(left, right))
        }))
    }

    fn size<D: ScoreDirector<S>>(&self, score_director: &D) -> usize {
        let n = self.access.entity_count(score_director.working_solution());
        n * n.saturating_sub(1) / 2
    }

    /// Swaps only exchange assigned values, so there is no value range to count.
    fn problem_size<D: ScoreDirector<S>>(&self, score_director: &D) -> ProblemSize {
        ProblemSize {
            entity_count: self.access.entity_count(score_director.working_solution()),
            value_count: 0,
        }
    }
}
