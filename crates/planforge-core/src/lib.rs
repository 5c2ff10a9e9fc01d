//! planforge core - core types and traits for local search
//!
//! This crate provides the fundamental abstractions for planforge:
//! - Score types for representing solution quality
//! - The planning solution trait
//! - The shared error type

pub mod domain;
pub mod error;
pub mod score;

pub use domain::PlanningSolution;
pub use error::{PlanforgeError, Result};
pub use score::{
    BendableScore, HardMediumSoftScore, HardSoftScore, ParseableScore, Score, ScoreParseError,
    SimpleScore,
};
