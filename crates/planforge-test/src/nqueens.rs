//! N-Queens problem test fixtures.
//!
//! Places N queens on an N×N board so that no two queens share a row or
//! a diagonal. Each queen owns a fixed column and a movable `row`.
//!
//! # Example
//!
//! ```
//! use planforge_scoring::ScoreDirector;
//! use planforge_test::nqueens::create_nqueens_director;
//!
//! let mut director = create_nqueens_director(&[1, 3, 0, 2]);
//! assert_eq!(director.calculate_score().score(), 0);
//! ```

use planforge_core::{PlanningSolution, SimpleScore};
use planforge_scoring::SimpleScoreDirector;

/// A queen entity; `row` is the planning variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Queen {
    pub column: i64,
    pub row: Option<i64>,
}

/// N-Queens problem solution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NQueensSolution {
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    /// Creates an N-Queens solution with queens at the specified rows.
    pub fn with_rows(rows: &[i64]) -> Self {
        Self::with_optional_rows(&rows.iter().map(|&r| Some(r)).collect::<Vec<_>>())
    }

    /// Creates an N-Queens solution where some rows may be unassigned.
    pub fn with_optional_rows(rows: &[Option<i64>]) -> Self {
        let queens = rows
            .iter()
            .enumerate()
            .map(|(i, &row)| Queen {
                column: i as i64,
                row,
            })
            .collect();
        Self {
            queens,
            score: None,
        }
    }

    /// Creates an N-Queens solution with n unassigned queens.
    pub fn uninitialized(n: usize) -> Self {
        Self::with_optional_rows(&vec![None; n])
    }

    /// Returns the assigned rows, `None` for unassigned queens.
    pub fn rows(&self) -> Vec<Option<i64>> {
        self.queens.iter().map(|q| q.row).collect()
    }

    /// Returns every row value a queen may take.
    pub fn row_range(&self) -> Vec<i64> {
        (0..self.queens.len() as i64).collect()
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

/// Typed getter for the `row` variable.
pub fn get_queen_row(s: &NQueensSolution, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

/// Typed setter for the `row` variable.
pub fn set_queen_row(s: &mut NQueensSolution, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

/// Returns the number of queens.
pub fn queen_count(s: &NQueensSolution) -> usize {
    s.queens.len()
}

/// Counts row and diagonal conflicts between every pair of assigned queens.
///
/// Each unassigned queen lowers the init score by one.
pub fn calculate_conflicts(solution: &NQueensSolution) -> SimpleScore {
    let queens = &solution.queens;
    let unassigned = queens.iter().filter(|q| q.row.is_none()).count() as i64;
    let mut conflicts = 0i64;

    for i in 0..queens.len() {
        for j in (i + 1)..queens.len() {
            if let (Some(row_i), Some(row_j)) = (queens[i].row, queens[j].row) {
                if row_i == row_j {
                    conflicts += 1;
                }
                let col_diff = (queens[j].column - queens[i].column).abs();
                if (row_i - row_j).abs() == col_diff {
                    conflicts += 1;
                }
            }
        }
    }

    SimpleScore::of_uninitialized(-unassigned, -conflicts)
}

/// Director type produced by the N-Queens factories.
pub type NQueensDirector =
    SimpleScoreDirector<NQueensSolution, fn(&NQueensSolution) -> SimpleScore>;

/// Creates a director for N-Queens with queens at the specified rows.
pub fn create_nqueens_director(rows: &[i64]) -> NQueensDirector {
    SimpleScoreDirector::new(NQueensSolution::with_rows(rows), calculate_conflicts)
}

/// Creates a director for N-Queens with optional rows.
pub fn create_nqueens_director_optional(rows: &[Option<i64>]) -> NQueensDirector {
    SimpleScoreDirector::new(NQueensSolution::with_optional_rows(rows), calculate_conflicts)
}
