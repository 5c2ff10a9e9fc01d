//! Single-level score.

use super::traits::Score;

/// Score with one level behind the init score.
///
/// Fits problems where every violation weighs the same, such as the
/// number of attacking queen pairs.
///
/// ```
/// use planforge_core::score::{Score, SimpleScore};
///
/// let two_unplaced = SimpleScore::of_uninitialized(-2, 0);
/// let placed = SimpleScore::of(-100);
/// assert!(placed > two_unplaced);
/// assert!(!two_unplaced.is_feasible());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore {
    init_score: i64,
    score: i64,
}

impl SimpleScore {
    pub const ZERO: SimpleScore = SimpleScore::of(0);

    pub const fn of(score: i64) -> Self {
        Self::of_uninitialized(0, score)
    }

    pub const fn of_uninitialized(init_score: i64, score: i64) -> Self {
        Self { init_score, score }
    }

    pub const fn score(&self) -> i64 {
        self.score
    }
}

impl Score for SimpleScore {
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        Self::of_uninitialized(init_score, self.score)
    }

    fn is_feasible(&self) -> bool {
        self.is_solution_initialized()
    }

    fn zero() -> Self {
        Self::ZERO
    }

    fn levels_count() -> usize {
        1
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.score]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        match *levels {
            [score] => Self::of(score),
            _ => panic!("SimpleScore has 1 level, got {}", levels.len()),
        }
    }

    impl_score_scale!(SimpleScore { score } => of_uninitialized);
}

impl_score_ops!(SimpleScore { score } => of_uninitialized);

impl_score_parse!(SimpleScore { score => "" } => of_uninitialized);
