//! Move selectors.
//!
//! Selectors enumerate the candidate moves the decider evaluates in one
//! step. Every call to `iter_moves` starts a fresh, finite sequence.

pub mod decorator;
mod move_selector;
mod selection_order;


pub use decorator::{
    FilteringMoveSelector, ProbabilityMoveSelector, ShufflingMoveSelector, UnionMoveSelector,
};
pub use move_selector::{ChangeMoveSelector, MoveSelector, ProblemSize, SwapMoveSelector};
pub use selection_order::SelectionOrder;
