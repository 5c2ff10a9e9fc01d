use serde::{Deserialize, Serialize};

use crate::acceptor::{AcceptorConfig, ForagerConfig};
use crate::termination::TerminationConfig;

/// One entry of `phases`, selected by its `type` key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    LocalSearch(LocalSearchConfig),
    PartitionedSearch(PartitionedSearchConfig),
}

impl PhaseConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Self::LocalSearch(config) => config.validate(),
            Self::PartitionedSearch(config) => config.validate(),
        }
    }
}

/// Settings of a local search phase.
///
/// With no acceptor the phase uses late acceptance; with no forager
/// the accepted count limit follows the acceptor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    pub acceptor: Option<AcceptorConfig>,
    pub forager: Option<ForagerConfig>,
    pub termination: Option<TerminationConfig>,
}

impl LocalSearchConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        self.acceptor
            .as_ref()
            .map_or(Ok(()), AcceptorConfig::validate)?;
        self.forager.as_ref().map_or(Ok(()), ForagerConfig::validate)
    }
}

/// Splits the solution, solves the parts on worker threads and merges
/// every improvement back into the parent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PartitionedSearchConfig {
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Phases each partition runs, in order.
    #[serde(default)]
    pub phases: Vec<LocalSearchConfig>,

    pub termination: Option<TerminationConfig>,
}

impl PartitionedSearchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.thread_count == ThreadCount::Count(0) {
            return Err("thread_count must be > 0".to_string());
        }
        self.phases.iter().try_for_each(LocalSearchConfig::validate)
    }
}

/// Worker threads for partitioned search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Available cores, but never more than there are partitions.
    #[default]
    Auto,

    Unlimited,

    Count(usize),
}

impl ThreadCount {
    /// Threads to spawn for `partition_count` partitions. Always at least one.
    pub fn resolve(&self, partition_count: usize) -> usize {
        let wanted = match *self {
            Self::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
            Self::Unlimited => partition_count,
            Self::Count(n) => n,
        };
        wanted.min(partition_count).max(1)
    }
}
