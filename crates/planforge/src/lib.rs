//! planforge - metaheuristic local search in Rust
//!
//! Tabu search, late acceptance, simulated annealing, great deluge and
//! hill climbing over user-defined moves, with partitioned search for
//! splitting large problems across threads.
//!
//! # Example
//!
//! ```rust
//! use planforge::prelude::*;
//! use planforge_test::nqueens::{
//!     create_nqueens_director, get_queen_row, queen_count, set_queen_row,
//! };
//! use planforge_test::NQueensSolution;
//!
//! let selector: ChangeMoveSelector<NQueensSolution, i64> = ChangeMoveSelector::new(
//!     queen_count,
//!     (0..4).collect(),
//!     get_queen_row,
//!     set_queen_row,
//!     0,
//!     "row",
//! );
//! let mut phase = LocalSearchPhase::new(
//!     selector,
//!     HillClimbingAcceptor::new(),
//!     AcceptedForager::<NQueensSolution>::best_of(usize::MAX),
//! )
//! .with_step_limit(10);
//!
//! let mut solver_scope = SolverScope::new(create_nqueens_director(&[1, 3, 0, 0]));
//! phase.solve(&mut solver_scope).unwrap();
//! assert_eq!(solver_scope.best_score(), Some(&SimpleScore::of(0)));
//! ```

// Score types
pub use planforge_core::{
    BendableScore, HardMediumSoftScore, HardSoftScore, ParseableScore, Score, SimpleScore,
};

// Domain and errors
pub use planforge_core::{PlanforgeError, PlanningSolution, Result};

// Score calculation
pub use planforge_scoring::{ScoreDirector, SimpleScoreDirector};

// Configuration
pub use planforge_config::{ConfigError, SolverConfig};

pub use planforge_solver::{builder, heuristic, phase, scope};
pub use planforge_solver::{
    AcceptedForager, Acceptor, AcceptorBuilder, ChangeMove, ChangeMoveSelector,
    CompositeAcceptor, EntityTabuAcceptor, ForagerBuilder, FunctionalPartitioner,
    GreatDelugeAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchPhase,
    LocalSearchPhaseBuilder, Move, MoveSelector, MoveTabuAcceptor, PartitionQueue,
    PartitionedSearchPhase, PartitionedSearchPhaseBuilder, Phase, SimulatedAnnealingAcceptor,
    SolutionPartitioner, SolutionTabuAcceptor, SolverScope, StepCountingHillClimbingAcceptor,
    SwapMove, SwapMoveSelector, TabuAcceptor, UndoMovePolicy, ValueTabuAcceptor,
};

pub mod prelude {
    pub use super::{
        BendableScore, HardMediumSoftScore, HardSoftScore, Score, SimpleScore,
    };
    pub use super::{PlanningSolution, ScoreDirector};
    pub use super::{
        AcceptedForager, ChangeMoveSelector, HillClimbingAcceptor, LateAcceptanceAcceptor,
        LocalSearchPhase, Move, MoveSelector, Phase, SolverScope, SwapMoveSelector, TabuAcceptor,
    };
}
