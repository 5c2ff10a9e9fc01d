//! BendableScore - Multi-level score with a compile-time number of levels

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::traits::{checked_divisor, floor_to_i64, ParseableScore, Score, ScoreParseError};

/// A score with `H` hard levels and `S` soft levels.
///
/// The level counts are const generic parameters, so scores of different
/// shapes are different types and can never be mixed by accident.
///
/// # Examples
///
/// ```
/// use planforge_core::score::{BendableScore, Score};
///
/// // 2 hard levels and 3 soft levels
/// let score = BendableScore::<2, 3>::of([-1, -2], [-10, -20, -30]);
///
/// assert_eq!(BendableScore::<2, 3>::levels_count(), 5);
/// assert!(!score.is_feasible());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BendableScore<const H: usize, const S: usize> {
    init_score: i64,
    hard_scores: [i64; H],
    soft_scores: [i64; S],
}

impl<const H: usize, const S: usize> BendableScore<H, S> {
    /// Creates an initialized score from hard and soft level values.
    pub const fn of(hard_scores: [i64; H], soft_scores: [i64; S]) -> Self {
        BendableScore {
            init_score: 0,
            hard_scores,
            soft_scores,
        }
    }

    /// Creates a score with the given init score.
    pub const fn of_uninitialized(
        init_score: i64,
        hard_scores: [i64; H],
        soft_scores: [i64; S],
    ) -> Self {
        BendableScore {
            init_score,
            hard_scores,
            soft_scores,
        }
    }

    /// Returns the hard score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn hard_score(&self, level: usize) -> i64 {
        self.hard_scores[level]
    }

    /// Returns the soft score at the given level.
    ///
    /// # Panics
    /// Panics if the level is out of bounds.
    pub fn soft_score(&self, level: usize) -> i64 {
        self.soft_scores[level]
    }

    /// Returns all hard scores.
    pub fn hard_scores(&self) -> &[i64; H] {
        &self.hard_scores
    }

    /// Returns all soft scores.
    pub fn soft_scores(&self) -> &[i64; S] {
        &self.soft_scores
    }

    fn map(&self, f: impl Fn(i64) -> i64) -> Self {
        BendableScore {
            init_score: f(self.init_score),
            hard_scores: self.hard_scores.map(&f),
            soft_scores: self.soft_scores.map(&f),
        }
    }

    fn zip(&self, other: &Self, f: impl Fn(i64, i64) -> i64) -> Self {
        let mut result = *self;
        result.init_score = f(self.init_score, other.init_score);
        for (r, o) in result.hard_scores.iter_mut().zip(other.hard_scores) {
            *r = f(*r, o);
        }
        for (r, o) in result.soft_scores.iter_mut().zip(other.soft_scores) {
            *r = f(*r, o);
        }
        result
    }
}

impl<const H: usize, const S: usize> Default for BendableScore<H, S> {
    fn default() -> Self {
        BendableScore::of([0; H], [0; S])
    }
}

impl<const H: usize, const S: usize> Score for BendableScore<H, S> {
    fn init_score(&self) -> i64 {
        self.init_score
    }

    fn with_init_score(&self, init_score: i64) -> Self {
        BendableScore {
            init_score,
            ..*self
        }
    }

    fn is_feasible(&self) -> bool {
        self.is_solution_initialized() && self.hard_scores.iter().all(|&s| s >= 0)
    }

    fn zero() -> Self {
        BendableScore::default()
    }

    fn levels_count() -> usize {
        H + S
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        let mut levels = self.hard_scores.to_vec();
        levels.extend_from_slice(&self.soft_scores);
        levels
    }

    fn from_level_numbers(levels: &[i64]) -> Self {
        assert_eq!(
            levels.len(),
            H + S,
            "BendableScore<{}, {}> requires exactly {} levels",
            H,
            S,
            H + S
        );
        let mut score = BendableScore::default();
        score.hard_scores.copy_from_slice(&levels[..H]);
        score.soft_scores.copy_from_slice(&levels[H..]);
        score
    }

    fn multiply(&self, multiplicand: f64) -> Self {
        self.map(|v| floor_to_i64(v as f64 * multiplicand))
    }

    fn divide(&self, divisor: f64) -> Self {
        let divisor = checked_divisor(divisor);
        self.map(|v| floor_to_i64(v as f64 / divisor))
    }

    fn power(&self, exponent: f64) -> Self {
        self.map(|v| floor_to_i64((v as f64).powf(exponent)))
    }

    fn abs(&self) -> Self {
        self.map(i64::abs)
    }

}

impl<const H: usize, const S: usize> Ord for BendableScore<H, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.init_score
            .cmp(&other.init_score)
            .then_with(|| self.hard_scores.cmp(&other.hard_scores))
            .then_with(|| self.soft_scores.cmp(&other.soft_scores))
    }
}

impl<const H: usize, const S: usize> PartialOrd for BendableScore<H, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const H: usize, const S: usize> Add for BendableScore<H, S> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip(&other, |a, b| a + b)
    }
}

impl<const H: usize, const S: usize> Sub for BendableScore<H, S> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.zip(&other, |a, b| a - b)
    }
}

impl<const H: usize, const S: usize> Neg for BendableScore<H, S> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl<const H: usize, const S: usize> fmt::Debug for BendableScore<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BendableScore({})", self)
    }
}

impl<const H: usize, const S: usize> fmt::Display for BendableScore<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

/// Format: `[Ninit/][h0/h1/..]hard/[s0/s1/..]soft`, for example `[-1/0]hard/[-5]soft`.
impl<const H: usize, const S: usize> ParseableScore for BendableScore<H, S> {
    fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (init_score, rest) = match s.split_once("init/") {
            Some((init, rest)) => {
                let init = init.trim().parse::<i64>().map_err(|e| ScoreParseError {
                    message: format!("Invalid init score '{}': {}", init, e),
                })?;
                (init, rest)
            }
            None => (0, s),
        };

        let (hard_part, soft_part) = rest.split_once("hard/").ok_or_else(|| ScoreParseError {
            message: format!("BendableScore '{}' must contain a 'hard/' part", s),
        })?;
        let soft_part = soft_part.strip_suffix("soft").ok_or_else(|| ScoreParseError {
            message: format!("BendableScore '{}' must end with 'soft'", s),
        })?;

        let mut score = BendableScore::default();
        score.init_score = init_score;
        parse_levels(hard_part, &mut score.hard_scores)?;
        parse_levels(soft_part, &mut score.soft_scores)?;
        Ok(score)
    }

    fn to_string_repr(&self) -> String {
        let join = |levels: &[i64]| {
            levels
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("/")
        };
        let levels = format!(
            "[{}]hard/[{}]soft",
            join(&self.hard_scores),
            join(&self.soft_scores)
        );
        if self.init_score != 0 {
            format!("{}init/{}", self.init_score, levels)
        } else {
            levels
        }
    }
}

fn parse_levels(part: &str, target: &mut [i64]) -> Result<(), ScoreParseError> {
    let inner = part
        .trim()
        .strip_prefix('[')
        .and_then(|p| p.strip_suffix(']'))
        .ok_or_else(|| ScoreParseError {
            message: format!("Level group '{}' must be wrapped in brackets", part),
        })?;
    let values: Vec<&str> = if inner.is_empty() {
        Vec::new()
    } else {
        inner.split('/').collect()
    };
    if values.len() != target.len() {
        return Err(ScoreParseError {
            message: format!(
                "Level group '{}' has {} levels, expected {}",
                part,
                values.len(),
                target.len()
            ),
        });
    }
    for (slot, value) in target.iter_mut().zip(values) {
        *slot = value.trim().parse::<i64>().map_err(|e| ScoreParseError {
            message: format!("Invalid level '{}': {}", value, e),
        })?;
    }
    Ok(())
}
