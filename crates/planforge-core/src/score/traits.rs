//! Core Score trait definition

use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

use thiserror::Error;

/// Core trait for all score types in planforge.
///
/// A score is an ordered tuple `(init_score, level_1, .., level_k)`.
/// The init score counts unassigned planning variables (it is `<= 0`,
/// and `0` means fully initialized) and always compares before the levels.
/// Levels compare lexicographically, highest priority first.
///
/// All score implementations must be:
/// - Immutable (operations return new instances)
/// - Thread-safe (Send + Sync)
/// - Totally ordered
///
/// `multiply`, `divide` and `power` floor every component so results
/// are reproducible across runs and platforms.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns the init score: minus the number of unassigned variables.
    fn init_score(&self) -> i64;

    /// Returns a copy of this score with the given init score.
    fn with_init_score(&self, init_score: i64) -> Self;

    /// Returns true if every planning variable is assigned.
    fn is_solution_initialized(&self) -> bool {
        self.init_score() >= 0
    }

    /// Returns true if this score represents a feasible solution.
    ///
    /// A solution is feasible when it is fully initialized and all hard
    /// levels are `>= 0`.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Returns the number of score levels, not counting the init score.
    fn levels_count() -> usize;

    /// Returns the level values, highest priority first.
    ///
    /// The init score is not included.
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Creates an initialized score from level numbers.
    ///
    /// # Panics
    /// Panics if the number of levels doesn't match `levels_count()`.
    fn from_level_numbers(levels: &[i64]) -> Self;

    /// Multiplies every component by a scalar, flooring the result.
    fn multiply(&self, multiplicand: f64) -> Self;

    /// Divides every component by a scalar, flooring the result.
    ///
    /// # Panics
    /// Panics with "attempt to divide by zero" if `divisor` is zero.
    fn divide(&self, divisor: f64) -> Self;

    /// Raises every component to the given power, flooring the result.
    fn power(&self, exponent: f64) -> Self;

    /// Returns the absolute value of every component.
    fn abs(&self) -> Self;

    /// Compares two scores, returning the ordering.
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    /// Returns true if this score is better than the other score.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is worse than the other score.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }
}

/// Scores that can be parsed from their display form.
pub trait ParseableScore: Score {
    /// Parses a score from a string representation.
    ///
    /// # Format
    /// - SimpleScore: "42" or "-3init/42"
    /// - HardSoftScore: "0hard/-100soft" or "-2init/-1hard/0soft"
    /// - HardMediumSoftScore: "0hard/0medium/-100soft"
    fn parse(s: &str) -> Result<Self, ScoreParseError>;

    /// Returns the string representation of this score.
    fn to_string_repr(&self) -> String;
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Score parse error: {message}")]
pub struct ScoreParseError {
    pub message: String,
}

pub(crate) fn floor_to_i64(value: f64) -> i64 {
    value.floor() as i64
}

pub(crate) fn checked_divisor(divisor: f64) -> f64 {
    if divisor == 0.0 {
        panic!("attempt to divide by zero");
    }
    divisor
}
