use std::hash::{Hash, Hasher};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;

/// One planning variable of one entity class, reached through plain
/// function pointers into the solution.
///
/// Two slots are the same variable when descriptor and name match; the
/// pointers themselves take no part in equality.
pub(crate) struct VariableSlot<S, V> {
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    pub(crate) name: &'static str,
    pub(crate) descriptor_index: usize,
}

impl<S, V> VariableSlot<S, V> {
    pub(crate) fn new(
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        name: &'static str,
        descriptor_index: usize,
    ) -> Self {
        Self {
            getter,
            setter,
            name,
            descriptor_index,
        }
    }

    pub(crate) fn read(&self, solution: &S, entity_index: usize) -> Option<V> {
        (self.getter)(solution, entity_index)
    }

    /// Sets the value, wrapped in the director's change notifications.
    pub(crate) fn write<D>(&self, score_director: &mut D, entity_index: usize, value: Option<V>)
    where
        S: PlanningSolution,
        D: ScoreDirector<S>,
    {
        score_director.before_variable_changed(self.descriptor_index, entity_index, self.name);
        (self.setter)(score_director.working_solution_mut(), entity_index, value);
        score_director.after_variable_changed(self.descriptor_index, entity_index, self.name);
    }
}

impl<S, V> Clone for VariableSlot<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for VariableSlot<S, V> {}

impl<S, V> PartialEq for VariableSlot<S, V> {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor_index == other.descriptor_index && self.name == other.name
    }
}

impl<S, V> Eq for VariableSlot<S, V> {}

impl<S, V> Hash for VariableSlot<S, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor_index.hash(state);
        self.name.hash(state);
    }
}
