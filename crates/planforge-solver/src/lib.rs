//! planforge Solver Engine
//!
//! This crate provides the local search engine:
//! - Move system (change, swap, composite moves with exact undo moves)
//! - Move selectors and selector decorators
//! - Acceptors (hill climbing, tabu search, late acceptance, simulated
//!   annealing, step counting hill climbing, great deluge)
//! - Foragers and the local search decider
//! - Partitioned search with the partition queue
//! - Configuration wiring (builder module)

pub mod builder;
pub mod heuristic;
pub mod phase;
pub mod scope;

#[cfg(test)]
mod test_utils;

pub use builder::{
    AcceptorBuilder, ConfiguredLocalSearch, ConfiguredPartitionPhases, ForagerBuilder,
    LocalSearchPhaseBuilder, PartitionedSearchPhaseBuilder,
};
pub use heuristic::{
    ChangeMove, ChangeMoveSelector, CompositeMove, EitherMove, FilteringMoveSelector, Move,
    MoveArena, MoveSelector, ProbabilityMoveSelector, ProblemSize, SelectionOrder,
    ShufflingMoveSelector,
    SwapMove, SwapMoveSelector, UnionMoveSelector,
};
pub use phase::localsearch::{
    AcceptedForager, Acceptor, CompositeAcceptor, EntityTabuAcceptor, EntityTabuKeys,
    GreatDelugeAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchDecider,
    LocalSearchForager, LocalSearchPhase, MoveCandidate, MoveTabuAcceptor, MoveTabuKeys,
    SimulatedAnnealingAcceptor, SolutionTabuAcceptor, SolutionTabuKeys,
    StepCountingHillClimbingAcceptor, StepCountingType, StepDecision, StepOutcome, TabuAcceptor,
    TabuKeySource, TabuSizeStrategy, UndoMovePolicy, ValueTabuAcceptor, ValueTabuKeys,
};
pub use phase::partitioned::{
    FunctionalPartitioner, PartitionChangeMove, PartitionError, PartitionQueue, PartitionQueueIter,
    PartitionedSearchPhase, SolutionPartitioner,
};
pub use phase::Phase;
pub use scope::{PhaseScope, SolverScope};
