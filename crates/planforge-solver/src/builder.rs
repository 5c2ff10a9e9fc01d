//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual solver implementation.

use std::fmt::Debug;
use std::hash::Hash;

use planforge_config::{
    AcceptorConfig, EnvironmentMode, ForagerConfig, GreatDelugeConfig, LateAcceptanceConfig,
    LocalSearchConfig, PartitionedSearchConfig, SimulatedAnnealingConfig, SolverConfig,
    StepCountingHillClimbingConfig, StepCountingHillClimbingType, TabuSearchConfig, TabuSize,
    TabuWindow,
};
use planforge_core::{PlanforgeError, PlanningSolution, Result};
use planforge_scoring::ScoreDirector;

use crate::heuristic::r#move::Move;
use crate::heuristic::selector::MoveSelector;
use crate::phase::localsearch::{
    AcceptedForager, Acceptor, CompositeAcceptor, EntityTabuKeys, GreatDelugeAcceptor,
    HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearchPhase, MoveTabuKeys,
    SimulatedAnnealingAcceptor, SolutionTabuKeys, StepCountingHillClimbingAcceptor,
    StepCountingType, TabuAcceptor, TabuKeySource, TabuSizeStrategy, UndoMovePolicy,
    ValueTabuKeys,
};
use crate::phase::partitioned::{PartitionedSearchPhase, SolutionPartitioner};

const DEFAULT_LATE_ACCEPTANCE_SIZE: usize = 400;
const DEFAULT_TABU_ACCEPTED_COUNT_LIMIT: usize = 1000;
const DEFAULT_DECAY_RATE: f64 = 0.999;
const DEFAULT_STEP_COUNTING_SIZE: u64 = 400;
const DEFAULT_WATER_LEVEL_INCREMENT_RATIO: f64 = 0.001;

type BoxedAcceptor<S, M> = Box<dyn Acceptor<S, M>>;

/// Builder for constructing acceptors from configuration.
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    /// Builds an acceptor from configuration.
    ///
    /// Several tabu families in one `tabu_search` config are combined
    /// into a [`CompositeAcceptor`]. Solution tabu needs a hashable
    /// solution and is rejected here; see
    /// [`build_with_solution_tabu`](Self::build_with_solution_tabu).
    pub fn build<S, M>(
        config: &AcceptorConfig,
        random_seed: Option<u64>,
    ) -> Result<BoxedAcceptor<S, M>>
    where
        S: PlanningSolution,
        M: Move<S> + 'static,
    {
        match config {
            AcceptorConfig::HillClimbing => Ok(Box::new(HillClimbingAcceptor::new())),
            AcceptorConfig::LateAcceptance(la_config) => {
                Ok(Box::new(Self::late_acceptance::<S>(la_config)))
            }
            AcceptorConfig::SimulatedAnnealing(sa_config) => {
                Ok(Box::new(Self::simulated_annealing::<S>(sa_config, random_seed)))
            }
            AcceptorConfig::StepCountingHillClimbing(sc_config) => {
                Ok(Box::new(Self::step_counting::<S>(sc_config)))
            }
            AcceptorConfig::GreatDeluge(gd_config) => {
                Ok(Box::new(Self::great_deluge::<S>(gd_config)))
            }
            AcceptorConfig::TabuSearch(tabu_config) => {
                if tabu_config.solution_window().is_some() {
                    return Err(PlanforgeError::Config(
                        "solution tabu requires a hashable solution, use build_with_solution_tabu"
                            .to_string(),
                    ));
                }
                Self::tabu_search(tabu_config, random_seed, Vec::new())
            }
        }
    }

    /// Builds an acceptor from configuration, including solution tabu.
    pub fn build_with_solution_tabu<S, M>(
        config: &AcceptorConfig,
        random_seed: Option<u64>,
    ) -> Result<BoxedAcceptor<S, M>>
    where
        S: PlanningSolution + Eq + Hash + Debug,
        M: Move<S> + 'static,
    {
        match config {
            AcceptorConfig::TabuSearch(tabu_config) => {
                let mut extra = Vec::new();
                if let Some(window) = tabu_config.solution_window() {
                    extra.push(Self::tabu_family(
                        SolutionTabuKeys::<S>::new(),
                        window,
                        tabu_config,
                        random_seed.map(|seed| seed.wrapping_add(4)),
                    ));
                }
                Self::tabu_search(tabu_config, random_seed, extra)
            }
            other => Self::build(other, random_seed),
        }
    }

    /// Creates a late acceptance acceptor.
    pub fn late_acceptance<S: PlanningSolution>(
        config: &LateAcceptanceConfig,
    ) -> LateAcceptanceAcceptor<S> {
        let size = config
            .late_acceptance_size
            .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE);
        LateAcceptanceAcceptor::new(size)
            .with_hill_climbing(config.hill_climbing_enabled.unwrap_or(false))
    }

    /// Creates a simulated annealing acceptor.
    pub fn simulated_annealing<S: PlanningSolution>(
        config: &SimulatedAnnealingConfig,
        random_seed: Option<u64>,
    ) -> SimulatedAnnealingAcceptor<S> {
        let acceptor = SimulatedAnnealingAcceptor::new(
            config.starting_temperature.clone(),
            config.decay_rate.unwrap_or(DEFAULT_DECAY_RATE),
        );
        match random_seed {
            Some(seed) => acceptor.with_seed(seed),
            None => acceptor,
        }
    }

    /// Creates a step counting hill climbing acceptor.
    pub fn step_counting<S: PlanningSolution>(
        config: &StepCountingHillClimbingConfig,
    ) -> StepCountingHillClimbingAcceptor<S> {
        let counting_type = match config.step_counting_hill_climbing_type {
            StepCountingHillClimbingType::Step => StepCountingType::Step,
            StepCountingHillClimbingType::EqualOrImprovingStep => {
                StepCountingType::EqualOrImprovingStep
            }
            StepCountingHillClimbingType::ImprovingStep => StepCountingType::ImprovingStep,
        };
        StepCountingHillClimbingAcceptor::new(
            config
                .step_counting_hill_climbing_size
                .unwrap_or(DEFAULT_STEP_COUNTING_SIZE),
        )
        .with_counting_type(counting_type)
    }

    /// Creates a great deluge acceptor.
    pub fn great_deluge<S: PlanningSolution>(config: &GreatDelugeConfig) -> GreatDelugeAcceptor<S> {
        GreatDelugeAcceptor::new(
            config
                .water_level_increment_ratio
                .unwrap_or(DEFAULT_WATER_LEVEL_INCREMENT_RATIO),
        )
    }

    fn tabu_search<S, M>(
        config: &TabuSearchConfig,
        random_seed: Option<u64>,
        extra: Vec<BoxedAcceptor<S, M>>,
    ) -> Result<BoxedAcceptor<S, M>>
    where
        S: PlanningSolution,
        M: Move<S> + 'static,
    {
        let mut acceptors: Vec<BoxedAcceptor<S, M>> = Vec::new();
        // Each family draws from its own stream.
        let seed_for = |offset: u64| random_seed.map(|seed| seed.wrapping_add(offset));

        if let Some(window) = config.entity_window() {
            acceptors.push(Self::tabu_family(EntityTabuKeys, window, config, seed_for(0)));
        }
        if let Some(window) = config.value_window() {
            acceptors.push(Self::tabu_family(ValueTabuKeys, window, config, seed_for(1)));
        }
        if let Some(window) = config.move_window() {
            let keys = MoveTabuKeys::new(UndoMovePolicy::TabuStep);
            acceptors.push(Self::tabu_family(keys, window, config, seed_for(2)));
        }
        if let Some(window) = config.undo_move_window() {
            let keys = MoveTabuKeys::new(UndoMovePolicy::TabuUndoStep);
            acceptors.push(Self::tabu_family(keys, window, config, seed_for(3)));
        }
        acceptors.extend(extra);

        match acceptors.len() {
            0 => Err(PlanforgeError::Config(
                "tabu_search requires at least one tabu size".to_string(),
            )),
            1 => Ok(acceptors.remove(0)),
            _ => Ok(Box::new(CompositeAcceptor::new(acceptors))),
        }
    }

    fn tabu_family<S, M, K>(
        key_source: K,
        window: TabuWindow,
        config: &TabuSearchConfig,
        random_seed: Option<u64>,
    ) -> BoxedAcceptor<S, M>
    where
        S: PlanningSolution,
        M: Move<S> + 'static,
        K: TabuKeySource<S, M> + 'static,
    {
        let mut acceptor = TabuAcceptor::<S, M, K>::new(key_source, 0)
            .with_tabu_size_strategy(tabu_size_strategy(window.tabu_size))
            .with_fading_tabu_size_strategy(tabu_size_strategy(window.fading_tabu_size))
            .with_aspiration(config.aspiration_enabled.unwrap_or(true));
        if let Some(seed) = random_seed {
            acceptor = acceptor.with_seed(seed);
        }
        Box::new(acceptor)
    }
}

fn tabu_size_strategy(size: TabuSize) -> TabuSizeStrategy {
    match size {
        TabuSize::Fixed(size) => TabuSizeStrategy::Fixed(size),
        TabuSize::EntityRatio(ratio) => TabuSizeStrategy::EntityRatio(ratio),
        TabuSize::ValueRatio(ratio) => TabuSizeStrategy::ValueRatio(ratio),
    }
}

/// Builder for constructing foragers from configuration.
pub struct ForagerBuilder;

impl ForagerBuilder {
    /// Builds a forager.
    ///
    /// Without an explicit `accepted_count_limit` the limit follows the
    /// acceptor: 1000 for tabu search, unlimited for hill climbing and 1
    /// for every other acceptor.
    pub fn build<S: PlanningSolution>(
        config: Option<&ForagerConfig>,
        acceptor: Option<&AcceptorConfig>,
    ) -> AcceptedForager<S> {
        let default_limit = match acceptor {
            Some(AcceptorConfig::TabuSearch(_)) => DEFAULT_TABU_ACCEPTED_COUNT_LIMIT,
            Some(AcceptorConfig::HillClimbing) => usize::MAX,
            Some(
                AcceptorConfig::LateAcceptance(_)
                | AcceptorConfig::SimulatedAnnealing(_)
                | AcceptorConfig::StepCountingHillClimbing(_)
                | AcceptorConfig::GreatDeluge(_),
            )
            | None => 1,
        };
        let limit = config
            .and_then(|c| c.accepted_count_limit)
            .unwrap_or(default_limit);
        let pick_early_type = config.and_then(|c| c.pick_early_type).unwrap_or_default();
        AcceptedForager::new(limit, pick_early_type)
    }
}

/// Local search phase built from configuration.
pub type ConfiguredLocalSearch<S, M, MS> =
    LocalSearchPhase<S, M, MS, Box<dyn Acceptor<S, M>>, AcceptedForager<S>>;

/// Builds a [`LocalSearchPhase`] from a [`LocalSearchConfig`].
///
/// A missing acceptor means late acceptance of size 400. Assert
/// environment modes turn on undo move verification.
///
/// # Example
///
/// ```
/// use planforge_config::{EnvironmentMode, LocalSearchConfig, TerminationConfig};
/// use planforge_solver::{ChangeMoveSelector, LocalSearchPhaseBuilder};
/// use planforge_test::nqueens::{get_queen_row, queen_count, set_queen_row};
/// use planforge_test::NQueensSolution;
///
/// let config = LocalSearchConfig {
///     termination: Some(TerminationConfig {
///         step_count_limit: Some(100),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// let selector: ChangeMoveSelector<NQueensSolution, i64> = ChangeMoveSelector::new(
///     queen_count,
///     (0..8).collect(),
///     get_queen_row,
///     set_queen_row,
///     0,
///     "row",
/// );
///
/// let phase = LocalSearchPhaseBuilder::new(config)
///     .with_environment_mode(EnvironmentMode::FullAssert)
///     .with_random_seed(42)
///     .build(selector)
///     .unwrap();
/// assert!(phase.decider().assert_undo_moves());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchPhaseBuilder {
    config: LocalSearchConfig,
    environment_mode: EnvironmentMode,
    random_seed: Option<u64>,
}

impl LocalSearchPhaseBuilder {
    pub fn new(config: LocalSearchConfig) -> Self {
        Self {
            config,
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
        }
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn with_random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = Some(random_seed);
        self
    }

    /// Takes the environment mode and random seed of a solver config, and
    /// its termination when this phase has none.
    pub fn with_solver_config(mut self, solver_config: &SolverConfig) -> Self {
        self.environment_mode = solver_config.environment_mode;
        self.random_seed = solver_config.random_seed;
        if self.config.termination.is_none() {
            self.config.termination = solver_config.termination.clone();
        }
        self
    }

    /// Builds the phase around `move_selector`.
    pub fn build<S, M, MS>(&self, move_selector: MS) -> Result<ConfiguredLocalSearch<S, M, MS>>
    where
        S: PlanningSolution,
        M: Move<S> + 'static,
        MS: MoveSelector<S, M>,
    {
        let acceptor: BoxedAcceptor<S, M> = match &self.config.acceptor {
            Some(config) => AcceptorBuilder::build(config, self.random_seed)?,
            None => Box::new(Self::default_acceptor::<S>()),
        };
        Ok(self.assemble(move_selector, acceptor))
    }

    /// Like [`build`](Self::build), but also allows solution tabu.
    pub fn build_with_solution_tabu<S, M, MS>(
        &self,
        move_selector: MS,
    ) -> Result<ConfiguredLocalSearch<S, M, MS>>
    where
        S: PlanningSolution + Eq + Hash + Debug,
        M: Move<S> + 'static,
        MS: MoveSelector<S, M>,
    {
        let acceptor: BoxedAcceptor<S, M> = match &self.config.acceptor {
            Some(config) => AcceptorBuilder::build_with_solution_tabu(config, self.random_seed)?,
            None => Box::new(Self::default_acceptor::<S>()),
        };
        Ok(self.assemble(move_selector, acceptor))
    }

    fn default_acceptor<S: PlanningSolution>() -> LateAcceptanceAcceptor<S> {
        LateAcceptanceAcceptor::new(DEFAULT_LATE_ACCEPTANCE_SIZE)
    }

    fn assemble<S, M, MS>(
        &self,
        move_selector: MS,
        acceptor: BoxedAcceptor<S, M>,
    ) -> ConfiguredLocalSearch<S, M, MS>
    where
        S: PlanningSolution,
        M: Move<S> + 'static,
        MS: MoveSelector<S, M>,
    {
        let forager =
            ForagerBuilder::build(self.config.forager.as_ref(), self.config.acceptor.as_ref());
        let mut phase = LocalSearchPhase::new(move_selector, acceptor, forager)
            .with_assert_undo_moves(self.environment_mode.is_asserted());

        if let Some(termination) = &self.config.termination {
            if let Some(limit) = termination.step_count_limit {
                phase = phase.with_step_limit(limit);
            }
            if let Some(limit) = termination.unimproved_step_count_limit {
                phase = phase.with_unimproved_step_limit(limit);
            }
            if let Some(limit) = termination.time_limit() {
                phase = phase.with_time_limit(limit);
            }
        }
        phase
    }
}

/// Child phases of one partition built from configuration, run in order.
pub type ConfiguredPartitionPhases<S, M, MS> = Vec<ConfiguredLocalSearch<S, M, MS>>;

/// Builds a [`PartitionedSearchPhase`] from a [`PartitionedSearchConfig`].
///
/// Every partition runs the configured local search phases in order; with
/// none configured it runs one default local search. A child phase without
/// its own termination inherits the partitioned search termination. Child
/// phase `j` of partition `i` is seeded with `seed + (i << 32) + j`.
#[derive(Debug, Clone, Default)]
pub struct PartitionedSearchPhaseBuilder {
    config: PartitionedSearchConfig,
    environment_mode: EnvironmentMode,
    random_seed: Option<u64>,
}

impl PartitionedSearchPhaseBuilder {
    pub fn new(config: PartitionedSearchConfig) -> Self {
        Self {
            config,
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
        }
    }

    pub fn with_environment_mode(mut self, environment_mode: EnvironmentMode) -> Self {
        self.environment_mode = environment_mode;
        self
    }

    pub fn with_random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = Some(random_seed);
        self
    }

    /// Takes the environment mode and random seed of a solver config, and
    /// its termination when this phase has none.
    pub fn with_solver_config(mut self, solver_config: &SolverConfig) -> Self {
        self.environment_mode = solver_config.environment_mode;
        self.random_seed = solver_config.random_seed;
        if self.config.termination.is_none() {
            self.config.termination = solver_config.termination.clone();
        }
        self
    }

    /// Builds the phase.
    ///
    /// `selector_factory` creates the move selector of one partition from
    /// its index and solution. Acceptor settings that can never be built
    /// are reported here rather than from inside a partition.
    #[allow(clippy::type_complexity)]
    pub fn build<S, PD, M, MS, P, DF, SF>(
        &self,
        partitioner: P,
        director_factory: DF,
        selector_factory: SF,
    ) -> Result<
        PartitionedSearchPhase<
            S,
            PD,
            ConfiguredPartitionPhases<S, M, MS>,
            P,
            DF,
            impl Fn(usize, &S) -> Result<ConfiguredPartitionPhases<S, M, MS>> + Send + Sync,
        >,
    >
    where
        S: PlanningSolution,
        PD: ScoreDirector<S>,
        M: Move<S> + 'static,
        MS: MoveSelector<S, M>,
        P: SolutionPartitioner<S>,
        DF: Fn(S) -> PD + Send + Sync,
        SF: Fn(usize, &S) -> MS + Send + Sync,
    {
        let children = self.child_configs();
        for child in &children {
            if let Some(acceptor) = &child.acceptor {
                AcceptorBuilder::build::<S, M>(acceptor, None)?;
            }
        }

        let environment_mode = self.environment_mode;
        let random_seed = self.random_seed;
        let phase_factory = move |partition_index: usize, partition: &S| {
            children
                .iter()
                .enumerate()
                .map(|(phase_index, child)| {
                    let mut builder = LocalSearchPhaseBuilder::new(child.clone())
                        .with_environment_mode(environment_mode);
                    if let Some(seed) = random_seed {
                        builder = builder.with_random_seed(
                            seed.wrapping_add((partition_index as u64) << 32)
                                .wrapping_add(phase_index as u64),
                        );
                    }
                    builder.build(selector_factory(partition_index, partition))
                })
                .collect::<Result<ConfiguredPartitionPhases<S, M, MS>>>()
        };

        Ok(
            PartitionedSearchPhase::new(partitioner, director_factory, phase_factory)
                .with_thread_count(self.config.thread_count),
        )
    }

    fn child_configs(&self) -> Vec<LocalSearchConfig> {
        let mut children = if self.config.phases.is_empty() {
            vec![LocalSearchConfig::default()]
        } else {
            self.config.phases.clone()
        };
        for child in &mut children {
            if child.termination.is_none() {
                child.termination = self.config.termination.clone();
            }
        }
        children
    }
}
