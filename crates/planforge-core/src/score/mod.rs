//! Scores: how good a solution is, level by level.
//!
//! Higher is better. Each score also has an init part, minus the number
//! of unassigned variables, that outranks every level. Scores are plain
//! `Copy` values with component-wise arithmetic.

#[macro_use]
mod macros;

mod bendable;
mod hard_medium_soft;
mod hard_soft;
mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use bendable::BendableScore;
pub use hard_medium_soft::HardMediumSoftScore;
pub use hard_soft::HardSoftScore;
pub use simple::SimpleScore;
pub use traits::{ParseableScore, Score, ScoreParseError};
