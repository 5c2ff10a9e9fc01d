use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::phase::PhaseConfig;
use crate::termination::TerminationConfig;

/// Top-level settings of one solve.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Base seed; components derive their own streams from it.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Run in order, each starting from the previous one's best solution.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a TOML file. Same as [`from_toml_file`](Self::from_toml_file).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(ConfigError::from)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(ConfigError::from)
    }

    /// Caps the whole solve at `seconds`, keeping other termination settings.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        let mut termination = self.termination.take().unwrap_or_default();
        termination.seconds_spent_limit = Some(seconds);
        self.termination = Some(termination);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.termination
            .as_ref()
            .and_then(TerminationConfig::time_limit)
    }

    /// Rejects settings no phase could run with, naming the offending phase.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.phases
            .iter()
            .enumerate()
            .try_for_each(|(index, phase)| {
                phase
                    .validate()
                    .map_err(|reason| ConfigError::Invalid(format!("phase {index}: {reason}")))
            })
    }
}

/// How much checking the solver does while it runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    #[default]
    NonReproducible,

    /// Same seed, same result.
    Reproducible,

    /// Reproducible, and every undo move is checked against the score it restores.
    FastAssert,

    FullAssert,
}

impl EnvironmentMode {
    /// Whether undo moves are verified after each evaluation.
    pub fn is_asserted(&self) -> bool {
        matches!(self, Self::FastAssert | Self::FullAssert)
    }
}
