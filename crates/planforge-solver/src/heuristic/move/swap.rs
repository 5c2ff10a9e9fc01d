//! Exchange one variable's values between two entities.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

use super::traits::{value_hash, PlanningValues};
use super::variable::VariableSlot;
use super::Move;

/// Swaps the values of two entities of the same class. Its own undo.
pub struct SwapMove<S, V> {
    variable: VariableSlot<S, V>,
    indices: [usize; 2],
}

impl<S, V> SwapMove<S, V> {
    pub fn new(
        left_entity_index: usize,
        right_entity_index: usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            variable: VariableSlot::new(getter, setter, variable_name, descriptor_index),
            indices: [left_entity_index, right_entity_index],
        }
    }

    pub fn left_entity_index(&self) -> usize {
        self.indices[0]
    }

    pub fn right_entity_index(&self) -> usize {
        self.indices[1]
    }
}

impl<S, V> Clone for SwapMove<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for SwapMove<S, V> {}

impl<S, V> PartialEq for SwapMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.variable == other.variable && self.indices == other.indices
    }
}

impl<S, V> Eq for SwapMove<S, V> {}

impl<S, V> Hash for SwapMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variable.hash(state);
        self.indices.hash(state);
    }
}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [left, right] = self.indices;
        write!(
            f,
            "{}[{}].{} <-> {}[{}].{}",
            self.variable.descriptor_index,
            left,
            self.variable.name,
            self.variable.descriptor_index,
            right,
            self.variable.name
        )
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        let [left, right] = self.indices;
        let solution = score_director.working_solution();
        left != right && self.variable.read(solution, left) != self.variable.read(solution, right)
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, _score_director: &D) -> Self {
        *self
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        let [left, right] = self.indices;
        let left_value = self.variable.read(score_director.working_solution(), left);
        let right_value = self.variable.read(score_director.working_solution(), right);
        self.variable.write(score_director, left, right_value);
        self.variable.write(score_director, right, left_value);
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn entity_indices(&self) -> &[usize] {
        &self.indices
    }

    fn planning_values(&self, solution: &S) -> PlanningValues {
        self.indices
            .iter()
            .filter_map(|&index| self.variable.read(solution, index))
            .map(|value| value_hash(&value))
            .collect()
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}
