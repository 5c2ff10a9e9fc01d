//! Shared test fixtures for planforge crates.
//!
//! This crate provides small planning problems, their score calculations
//! and director factories. It does NOT depend on `planforge-solver`, so the
//! solver crate can use it as a dev-dependency.
//!
//! - [`nqueens`] - N-Queens with a single `row` variable and a `SimpleScore`
//! - [`assignment`] - task-to-machine assignment that splits into independent groups
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! planforge-test = { workspace = true }
//! ```

pub mod assignment;
pub mod nqueens;

pub use assignment::{Machine, Task, TaskAssignment};
pub use nqueens::{NQueensSolution, Queen};
