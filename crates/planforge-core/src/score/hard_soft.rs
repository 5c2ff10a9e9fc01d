//! Two-level score: hard feasibility, soft optimization.

use super::traits::Score;

/// Score with a hard and a soft level behind the init score.
///
/// A solution with any broken hard constraint loses to every solution
/// with none, whatever their soft levels are.
///
/// ```
/// use planforge_core::HardSoftScore;
///
/// let overloaded = HardSoftScore::of(-1, -4);
/// let balanced = HardSoftScore::of(0, -8);
/// assert!(balanced > overloaded);
/// assert!(HardSoftScore::of(0, -2) > balanced);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    init_score: i64,
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    pub const ZERO: HardSoftScore = HardSoftScore::of(0, 0);

    /// Initialized score (init score 0).
    pub const fn of(hard: i64, soft: i64) -> Self {
        Self::of_uninitialized(0, hard, soft)
    }

    /// Score of a solution with `-init_score` unassigned variables.
    pub const fn of_uninitialized(init_score: i64, hard: i64, soft: i64) -> Self {
        Self {
            init_score,
            hard,
            soft,
        }
    }

    pub const fn hard(&self) -> i64 {
        self.hard
    }

    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        Self::of_uninitialized(init_score, self.hard, self.soft)
    }

    fn is_feasible(&self) -> bool {
        self.hard >= 0 && self.is_solution_initialized()
    }

    fn zero() -> Self {
        Self::ZERO
    }

    fn levels_count() -> usize {
        2
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        match *levels {
            [hard, soft] => Self::of(hard, soft),
            _ => panic!("HardSoftScore has 2 levels, got {}", levels.len()),
        }
    }

    impl_score_scale!(HardSoftScore { hard, soft } => of_uninitialized);
}

impl_score_ops!(HardSoftScore { hard, soft } => of_uninitialized);

impl_score_parse!(HardSoftScore { hard => "hard", soft => "soft" } => of_uninitialized);
