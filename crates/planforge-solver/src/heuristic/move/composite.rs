//! CompositeMove - applies a sequence of moves as one step.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use super::traits::PlanningValues;
use super::Move;

/// A move made of several child moves applied in order.
///
/// The undo move applies the children's undo moves in reverse order.
/// Child undo moves are all created against the state before the
/// composite is applied, so children must change distinct variables.
pub struct CompositeMove<S, M> {
    moves: Vec<M>,
    entity_indices: Vec<usize>,
    _phantom: PhantomData<fn() -> S>,
}

impl<S: PlanningSolution, M: Move<S>> CompositeMove<S, M> {
    /// Creates a composite of `moves`, applied first to last.
    pub fn new(moves: Vec<M>) -> Self {
        let mut entity_indices = Vec::new();
        for m in &moves {
            for &index in m.entity_indices() {
                if !entity_indices.contains(&index) {
                    entity_indices.push(index);
                }
            }
        }
        Self {
            moves,
            entity_indices,
            _phantom: PhantomData,
        }
    }

    /// Returns the child moves.
    pub fn moves(&self) -> &[M] {
        &self.moves
    }
}

impl<S, M: Clone> Clone for CompositeMove<S, M> {
    fn clone(&self) -> Self {
        Self {
            moves: self.moves.clone(),
            entity_indices: self.entity_indices.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<S, M: PartialEq> PartialEq for CompositeMove<S, M> {
    fn eq(&self, other: &Self) -> bool {
        self.moves == other.moves
    }
}

impl<S, M: Eq> Eq for CompositeMove<S, M> {}

impl<S, M: Hash> Hash for CompositeMove<S, M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.moves.hash(state);
    }
}

impl<S, M: Debug> Debug for CompositeMove<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMove")
            .field("moves", &self.moves)
            .finish()
    }
}

impl<S, M> Move<S> for CompositeMove<S, M>
where
    S: PlanningSolution,
    M: Move<S>,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        self.moves.iter().any(|m| m.is_doable(score_director))
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let undo_moves = self
            .moves
            .iter()
            .rev()
            .map(|m| m.create_undo_move(score_director))
            .collect();
        Self {
            moves: undo_moves,
            entity_indices: self.entity_indices.clone(),
            _phantom: PhantomData,
        }
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        for m in &self.moves {
            m.do_move(score_director);
        }
    }

    fn descriptor_index(&self) -> usize {
        self.moves.first().map_or(0, |m| m.descriptor_index())
    }

    fn entity_indices(&self) -> &[usize] {
        &self.entity_indices
    }

    fn planning_values(&self, solution: &S) -> PlanningValues {
        self.moves
            .iter()
            .flat_map(|m| m.planning_values(solution))
            .collect()
    }

    fn variable_name(&self) -> &str {
        self.moves.first().map_or("", |m| m.variable_name())
    }
}
