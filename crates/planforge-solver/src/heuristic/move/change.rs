//! Assign one value to one entity.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;
use smallvec::smallvec;

use super::traits::{value_hash, PlanningValues};
use super::variable::VariableSlot;
use super::Move;

/// Sets the variable of entity `entity_index` to `to_value`.
///
/// `None` unassigns. The undo of a change is another change back to the
/// value read just before, so a change move never needs extra state.
pub struct ChangeMove<S, V> {
    variable: VariableSlot<S, V>,
    entity_index: usize,
    to_value: Option<V>,
}

impl<S, V> ChangeMove<S, V> {
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            variable: VariableSlot::new(getter, setter, variable_name, descriptor_index),
            entity_index,
            to_value,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V: Clone> Clone for ChangeMove<S, V> {
    fn clone(&self) -> Self {
        Self {
            variable: self.variable,
            entity_index: self.entity_index,
            to_value: self.to_value.clone(),
        }
    }
}

impl<S, V: PartialEq> PartialEq for ChangeMove<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.variable == other.variable
            && self.entity_index == other.entity_index
            && self.to_value == other.to_value
    }
}

impl<S, V: Eq> Eq for ChangeMove<S, V> {}

impl<S, V: Hash> Hash for ChangeMove<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variable.hash(state);
        self.entity_index.hash(state);
        self.to_value.hash(state);
    }
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}].{} <- {:?}",
            self.variable.descriptor_index, self.entity_index, self.variable.name, self.to_value
        )
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + Eq + Hash + Send + Sync + Debug + 'static,
{
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool {
        self.variable
            .read(score_director.working_solution(), self.entity_index)
            != self.to_value
    }

    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self {
        let previous = self
            .variable
            .read(score_director.working_solution(), self.entity_index);
        Self {
            variable: self.variable,
            entity_index: self.entity_index,
            to_value: previous,
        }
    }

    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D) {
        self.variable
            .write(score_director, self.entity_index, self.to_value.clone());
    }

    fn descriptor_index(&self) -> usize {
        self.variable.descriptor_index
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn planning_values(&self, _solution: &S) -> PlanningValues {
        self.to_value
            .as_ref()
            .map_or_else(PlanningValues::new, |value| smallvec![value_hash(value)])
    }

    fn variable_name(&self) -> &str {
        self.variable.name
    }
}
