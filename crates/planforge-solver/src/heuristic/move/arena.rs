//! Arena for the candidate moves of one step.
//!
//! The arena is reset and reused every step, so its buffer is allocated
//! once per phase instead of once per step.

use std::fmt::Debug;

/// Reusable per-step move storage.
///
/// Foragers keep `(index, score)` pairs; the winning move is moved out with
/// [`MoveArena::take`]. Moves are never cloned on this path.
///
/// # Example
///
/// ```
/// use planforge_solver::heuristic::r#move::MoveArena;
///
/// let mut arena: MoveArena<i32> = MoveArena::new();
/// arena.extend([1, 2, 3]);
/// assert_eq!(arena.len(), 3);
///
/// assert_eq!(arena.take(1), Some(2));
/// assert_eq!(arena.get(1), None);
///
/// arena.reset();
/// assert!(arena.is_empty());
/// ```
pub struct MoveArena<M> {
    slots: Vec<Option<M>>,
}

impl<M> MoveArena<M> {
    /// Creates a new empty arena.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Creates a new arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Empties the arena, keeping its buffer.
    pub fn reset(&mut self) {
        self.slots.clear();
    }

    /// Adds a move to the arena.
    pub fn push(&mut self, m: M) {
        self.slots.push(Some(m));
    }

    /// Returns the number of moves pushed since the last reset.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the move at `index`, unless it was taken.
    pub fn get(&self, index: usize) -> Option<&M> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Moves the move at `index` out of the arena.
    pub fn take(&mut self, index: usize) -> Option<M> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Returns an iterator over the moves still in the arena.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

impl<M> Default for MoveArena<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Extend<M> for MoveArena<M> {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        self.slots.extend(iter.into_iter().map(Some));
    }
}

impl<M> Debug for MoveArena<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveArena")
            .field("len", &self.slots.len())
            .field("capacity", &self.slots.capacity())
            .finish()
    }
}
