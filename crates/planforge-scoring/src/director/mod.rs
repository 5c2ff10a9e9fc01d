//! Score director trait and the reference full-recalculation director.

mod simple;
mod traits;

#[cfg(test)]
mod tests;

pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
