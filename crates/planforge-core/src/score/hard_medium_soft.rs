//! Three-level score.

use super::traits::Score;

/// Score with hard, medium and soft levels behind the init score.
///
/// The medium level ranks goals that matter more than any soft
/// preference but do not decide feasibility, such as the number of
/// tasks left unplanned.
///
/// ```
/// use planforge_core::HardMediumSoftScore;
///
/// let one_unplanned = HardMediumSoftScore::of(0, -1, 0);
/// let all_planned = HardMediumSoftScore::of(0, 0, -500);
/// assert!(all_planned > one_unplanned);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardMediumSoftScore {
    init_score: i64,
    hard: i64,
    medium: i64,
    soft: i64,
}

impl HardMediumSoftScore {
    pub const ZERO: HardMediumSoftScore = HardMediumSoftScore::of(0, 0, 0);

    pub const fn of(hard: i64, medium: i64, soft: i64) -> Self {
        Self::of_uninitialized(0, hard, medium, soft)
    }

    pub const fn of_uninitialized(init_score: i64, hard: i64, medium: i64, soft: i64) -> Self {
        Self {
            init_score,
            hard,
            medium,
            soft,
        }
    }

    pub const fn hard(&self) -> i64 {
        self.hard
    }

    pub const fn medium(&self) -> i64 {
        self.medium
    }

    pub const fn soft(&self) -> i64 {
        self.soft
    }
}

impl Score for HardMediumSoftScore {
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        Self::of_uninitialized(init_score, self.hard, self.medium, self.soft)
    }

    fn is_feasible(&self) -> bool {
        self.hard >= 0 && self.is_solution_initialized()
    }

    fn zero() -> Self {
        Self::ZERO
    }

    fn levels_count() -> usize {
        3
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.medium, self.soft]
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        match *levels {
            [hard, medium, soft] => Self::of(hard, medium, soft),
            _ => panic!("HardMediumSoftScore has 3 levels, got {}", levels.len()),
        }
    }

    impl_score_scale!(HardMediumSoftScore { hard, medium, soft } => of_uninitialized);
}

impl_score_ops!(HardMediumSoftScore { hard, medium, soft } => of_uninitialized);

impl_score_parse!(
    HardMediumSoftScore { hard => "hard", medium => "medium", soft => "soft" } => of_uninitialized
);
