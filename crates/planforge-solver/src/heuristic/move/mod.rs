//! Move system for modifying planning variables.
//!
//! Moves are the fundamental operations that change planning variable values.
//! Every move can build its exact inverse with [`Move::create_undo_move`]
//! before it is applied, so the decider can evaluate a candidate and restore
//! the working solution afterwards.
//!
//! # Arena Allocation
//!
//! Use [`MoveArena`] to hold the candidates of one step. The forager refers
//! to candidates by arena index and the winner is taken out of the arena.

mod arena;
mod change;
mod composite;
mod either;
mod swap;
mod traits;
mod variable;

#[cfg(test)]
mod tests;

pub use arena::MoveArena;
pub use change::ChangeMove;
pub use composite::CompositeMove;
pub use either::EitherMove;
pub use swap::SwapMove;
pub use traits::{value_hash, Move, PlanningValues};
