//! Local search phase
//!
//! Improves an existing solution by iteratively applying moves
//! that are accepted according to an acceptance criterion.

mod acceptor;
mod decider;
mod forager;
mod phase;

pub use acceptor::{
    Acceptor, CompositeAcceptor, EntityTabuAcceptor, EntityTabuKeys, GreatDelugeAcceptor,
    HillClimbingAcceptor, LateAcceptanceAcceptor, MoveCandidate, MoveTabuAcceptor, MoveTabuKeys,
    SimulatedAnnealingAcceptor, SolutionTabuAcceptor, SolutionTabuKeys,
    StepCountingHillClimbingAcceptor, StepCountingType, StepOutcome, TabuAcceptor, TabuKeySource,
    TabuSizeStrategy, UndoMovePolicy, ValueTabuAcceptor, ValueTabuKeys,
};
pub use decider::{LocalSearchDecider, StepDecision};
pub use forager::{AcceptedForager, LocalSearchForager};
pub use phase::LocalSearchPhase;
