//! Solver settings read from TOML or YAML.
//!
//! A [`SolverConfig`] names the environment mode, an optional seed,
//! global termination and the ordered list of phases. Nothing here
//! touches the solver; the builders in `planforge-solver` turn these
//! plain values into running phases.
//!
//! ```
//! use planforge_config::{AcceptorConfig, PhaseConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [[phases]]
//!     type = "local_search"
//!     [phases.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! let PhaseConfig::LocalSearch(phase) = &config.phases[0] else { panic!() };
//! assert!(matches!(phase.acceptor, Some(AcceptorConfig::LateAcceptance(_))));
//! ```
//!
//! A missing file is an error; callers that want defaults say so:
//!
//! ```
//! use planforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("planforge.toml").unwrap_or_default();
//! assert!(config.phases.is_empty());
//! ```

mod acceptor;
mod error;
mod phase;
mod solver;
mod termination;

pub use acceptor::{
    AcceptorConfig, ForagerConfig, GreatDelugeConfig, LateAcceptanceConfig, PickEarlyType,
    SimulatedAnnealingConfig, StepCountingHillClimbingConfig, StepCountingHillClimbingType,
    TabuSearchConfig, TabuSize, TabuWindow,
};
pub use error::ConfigError;
pub use phase::{LocalSearchConfig, PartitionedSearchConfig, PhaseConfig, ThreadCount};
pub use solver::{EnvironmentMode, SolverConfig};
pub use termination::TerminationConfig;
