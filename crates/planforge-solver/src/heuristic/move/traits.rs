//! Move trait definition.

use std::fmt::Debug;
use std::hash::{DefaultHasher, Hash, Hasher};

use planforge_core::PlanningSolution;
use planforge_scoring::ScoreDirector;
use smallvec::SmallVec;

/// Stable hashes of the planning values a move assigns.
pub type PlanningValues = SmallVec<[u64; 2]>;

/// A move that modifies one or more planning variables.
///
/// Moves are fully typed: no boxing, no virtual dispatch. Equality and
/// hashing are structural so a move can serve as a tabu key.
///
/// # Type Parameters
/// * `S` - The planning solution type
///
/// # Implementation Notes
/// - Moves should be lightweight; they are cloned into tabu lists
/// - `create_undo_move` must be called BEFORE `do_move`; applying the
///   returned move afterwards restores every observable value
/// - Methods are generic over D so moves work with any score director
pub trait Move<S: PlanningSolution>: Clone + Eq + std::hash::Hash + Send + Sync + Debug {
    /// Returns true if this move would change the working solution.
    ///
    /// A move is not doable if:
    /// - The source value equals the destination value (no change)
    /// - It swaps an entity with itself or two equal values
    fn is_doable<D: ScoreDirector<S>>(&self, score_director: &D) -> bool;

    /// Creates the move that reverts this move.
    ///
    /// Reads the current values, so it must be called on the state the
    /// move is about to be applied to.
    fn create_undo_move<D: ScoreDirector<S>>(&self, score_director: &D) -> Self;

    /// Executes this move, modifying the working solution.
    ///
    /// Every variable change is bracketed by the director's
    /// `before_variable_changed`/`after_variable_changed` notifications.
    fn do_move<D: ScoreDirector<S>>(&self, score_director: &mut D);

    /// Returns the descriptor index of the entity type this move affects.
    fn descriptor_index(&self) -> usize;

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns stable hashes of the planning values this move involves,
    /// read from `solution` where the move does not carry them itself.
    fn planning_values(&self, solution: &S) -> PlanningValues;

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}

/// Hashes a planning value with a fixed-key hasher.
///
/// The result is identical across runs of the same build, which keeps
/// value tabu reproducible under a fixed random seed.
pub fn value_hash<V: Hash + ?Sized>(value: &V) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
