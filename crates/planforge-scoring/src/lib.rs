//! Score directors for planforge.
//!
//! A score director owns the working solution, applies variable changes
//! on behalf of moves, and calculates the score. The local search engine
//! only ever talks to the [`ScoreDirector`] trait; how a score is derived
//! from domain constraints is up to the implementation.

pub mod director;

pub use director::{ScoreDirector, SimpleScoreDirector};
