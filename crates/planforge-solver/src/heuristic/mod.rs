//! Heuristic components: moves and move selectors.

pub mod r#move;
pub mod selector;

pub use r#move::{ChangeMove, CompositeMove, EitherMove, Move, MoveArena, SwapMove};
pub use selector::{
    ChangeMoveSelector, FilteringMoveSelector, MoveSelector, ProbabilityMoveSelector, ProblemSize,
    SelectionOrder, ShufflingMoveSelector, SwapMoveSelector, UnionMoveSelector,
};
