//! Tabu search acceptors.
//!
//! One algorithm, several notions of what is forbidden. A [`TabuKeySource`]
//! turns candidates and taken steps into tabu keys; [`TabuAcceptor`] stamps
//! the keys of every taken step with its step index and judges candidates
//! by the age of their youngest key.
//!
//! A key stamped fewer than `tabu_size` steps ago is forbidden outright.
//! For the next `fading_tabu_size` steps it is accepted with a chance that
//! rises linearly toward 1, after which it expires. Both sizes are either fixed or a share
//! of the entity or value count, resolved again at every step.

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

use planforge_core::{PlanforgeError, PlanningSolution, Result};

use super::{Acceptor, MoveCandidate, StepOutcome};
use crate::heuristic::r#move::Move;
use crate::heuristic::selector::ProblemSize;

/// Tabu keys of one candidate or step.
pub type TabuKeys<K> = SmallVec<[K; 2]>;

/// Extracts tabu keys from candidates and taken steps.
pub trait TabuKeySource<S: PlanningSolution, M: Move<S>>: Send + Debug {
    type Key: Eq + Hash + Clone + Send + Debug;

    /// Keys checked against the tabu list when judging a candidate.
    fn candidate_keys(&self, candidate: &MoveCandidate<'_, S, M>) -> TabuKeys<Self::Key>;

    /// Keys made tabu once a step is taken.
    fn step_keys(&self, outcome: &StepOutcome<'_, S, M>) -> TabuKeys<Self::Key>;
}

/// Which move becomes tabu when a step is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndoMovePolicy {
    /// The step's undo move becomes tabu, forbidding a move straight back.
    #[default]
    TabuUndoStep,
    /// The step itself becomes tabu, forbidding a repeat of the same move.
    TabuStep,
}

/// Moves as tabu keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveTabuKeys {
    policy: UndoMovePolicy,
}

impl MoveTabuKeys {
    pub fn new(policy: UndoMovePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UndoMovePolicy {
        self.policy
    }
}

impl<S: PlanningSolution, M: Move<S>> TabuKeySource<S, M> for MoveTabuKeys {
    type Key = M;

    fn candidate_keys(&self, candidate: &MoveCandidate<'_, S, M>) -> TabuKeys<M> {
        smallvec![candidate.mov.clone()]
    }

    fn step_keys(&self, outcome: &StepOutcome<'_, S, M>) -> TabuKeys<M> {
        match self.policy {
            UndoMovePolicy::TabuUndoStep => smallvec![outcome.undo_step.clone()],
            UndoMovePolicy::TabuStep => smallvec![outcome.step.clone()],
        }
    }
}

/// Planning entities as tabu keys: `(descriptor_index, entity_index)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityTabuKeys;

fn entity_keys<S: PlanningSolution, M: Move<S>>(mov: &M) -> TabuKeys<(usize, usize)> {
    let descriptor_index = mov.descriptor_index();
    mov.entity_indices()
        .iter()
        .map(|&entity_index| (descriptor_index, entity_index))
        .collect()
}

impl<S: PlanningSolution, M: Move<S>> TabuKeySource<S, M> for EntityTabuKeys {
    type Key = (usize, usize);

    fn candidate_keys(&self, candidate: &MoveCandidate<'_, S, M>) -> TabuKeys<(usize, usize)> {
        entity_keys(candidate.mov)
    }

    fn step_keys(&self, outcome: &StepOutcome<'_, S, M>) -> TabuKeys<(usize, usize)> {
        entity_keys(outcome.step)
    }
}

/// Assigned planning values as tabu keys.
///
/// Values are read from the post-move solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueTabuKeys;

impl<S: PlanningSolution, M: Move<S>> TabuKeySource<S, M> for ValueTabuKeys {
    type Key = u64;

    fn candidate_keys(&self, candidate: &MoveCandidate<'_, S, M>) -> TabuKeys<u64> {
        candidate.mov.planning_values(candidate.solution)
    }

    fn step_keys(&self, outcome: &StepOutcome<'_, S, M>) -> TabuKeys<u64> {
        outcome.step.planning_values(outcome.solution)
    }
}

/// Whole solutions as tabu keys.
///
/// The key is a clone of the post-move solution with its score cleared,
/// so two visits of the same assignment match regardless of score state.
pub struct SolutionTabuKeys<S> {
    _phantom: PhantomData<fn() -> S>,
}

impl<S> SolutionTabuKeys<S> {
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<S> Default for SolutionTabuKeys<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Debug for SolutionTabuKeys<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SolutionTabuKeys")
    }
}

fn solution_key<S: PlanningSolution>(solution: &S) -> S {
    let mut key = solution.clone();
    key.set_score(None);
    key
}

impl<S, M> TabuKeySource<S, M> for SolutionTabuKeys<S>
where
    S: PlanningSolution + Eq + Hash + Debug,
    M: Move<S>,
{
    type Key = S;

    fn candidate_keys(&self, candidate: &MoveCandidate<'_, S, M>) -> TabuKeys<S> {
        smallvec![solution_key(candidate.solution)]
    }

    fn step_keys(&self, outcome: &StepOutcome<'_, S, M>) -> TabuKeys<S> {
        smallvec![solution_key(outcome.solution)]
    }
}

/// How many steps one band of a tabu list lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabuSizeStrategy {
    Fixed(usize),
    /// A share of the entity count, strictly between 0 and 1.
    EntityRatio(f64),
    /// A share of the value count, strictly between 0 and 1.
    ValueRatio(f64),
}

impl TabuSizeStrategy {
    /// Resolves the strategy to a number of steps.
    ///
    /// A ratio rounds to the nearest step and is kept within `1..count`,
    /// so one entity (or value) is always tabu and one always free.
    pub fn resolve(&self, problem_size: ProblemSize) -> usize {
        match *self {
            Self::Fixed(size) => size,
            Self::EntityRatio(ratio) => ratio_size(problem_size.entity_count, ratio),
            Self::ValueRatio(ratio) => ratio_size(problem_size.value_count, ratio),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed(_) => Ok(()),
            Self::EntityRatio(ratio) | Self::ValueRatio(ratio) => {
                if ratio > 0.0 && ratio < 1.0 {
                    Ok(())
                } else {
                    Err(PlanforgeError::Config(format!(
                        "the tabu ratio ({ratio}) must be between 0.0 and 1.0"
                    )))
                }
            }
        }
    }
}

impl Default for TabuSizeStrategy {
    fn default() -> Self {
        Self::Fixed(0)
    }
}

fn ratio_size(count: usize, ratio: f64) -> usize {
    let size = (count as f64 * ratio).round() as usize;
    size.max(1).min(count.saturating_sub(1))
}

/// Tabu search acceptor over any [`TabuKeySource`].
///
/// # Example
///
/// ```
/// use planforge_solver::{ChangeMove, EntityTabuAcceptor, EntityTabuKeys};
/// use planforge_test::NQueensSolution;
///
/// type QueenChange = ChangeMove<NQueensSolution, i64>;
///
/// let acceptor: EntityTabuAcceptor<NQueensSolution, QueenChange> =
///     EntityTabuAcceptor::new(EntityTabuKeys, 7)
///         .with_fading_tabu_size(3)
///         .with_seed(42);
/// assert_eq!(acceptor.tabu_count(), 0);
/// ```
pub struct TabuAcceptor<S: PlanningSolution, M: Move<S>, K: TabuKeySource<S, M>> {
    key_source: K,
    tabu_size_strategy: TabuSizeStrategy,
    fading_tabu_size_strategy: TabuSizeStrategy,
    /// Steps during which a key is always rejected, as of the current step.
    tabu_size: usize,
    /// Further steps during which a key is accepted with rising chance.
    fading_tabu_size: usize,
    /// Whether a tabu candidate that beats the best score is accepted.
    aspiration_enabled: bool,
    rng: StdRng,
    /// Step index at which each key was last made tabu.
    tabu_to_step_index: HashMap<K::Key, u64>,
    /// Keys from oldest to youngest stamp.
    tabu_sequence: VecDeque<K::Key>,
    _phantom: PhantomData<fn() -> (S, M)>,
}

/// Forbids recently taken moves (or their undo moves).
pub type MoveTabuAcceptor<S, M> = TabuAcceptor<S, M, MoveTabuKeys>;
/// Forbids moving recently moved entities.
pub type EntityTabuAcceptor<S, M> = TabuAcceptor<S, M, EntityTabuKeys>;
/// Forbids recently assigned values.
pub type ValueTabuAcceptor<S, M> = TabuAcceptor<S, M, ValueTabuKeys>;
/// Forbids revisiting recent solutions.
pub type SolutionTabuAcceptor<S, M> = TabuAcceptor<S, M, SolutionTabuKeys<S>>;

impl<S: PlanningSolution, M: Move<S>, K: TabuKeySource<S, M>> TabuAcceptor<S, M, K> {
    /// Creates a tabu acceptor with no fading band and aspiration enabled.
    pub fn new(key_source: K, tabu_size: usize) -> Self {
        Self {
            key_source,
            tabu_size_strategy: TabuSizeStrategy::Fixed(tabu_size),
            fading_tabu_size_strategy: TabuSizeStrategy::Fixed(0),
            tabu_size,
            fading_tabu_size: 0,
            aspiration_enabled: true,
            rng: StdRng::from_os_rng(),
            tabu_to_step_index: HashMap::new(),
            tabu_sequence: VecDeque::new(),
            _phantom: PhantomData,
        }
    }

    pub fn with_fading_tabu_size(self, fading_tabu_size: usize) -> Self {
        self.with_fading_tabu_size_strategy(TabuSizeStrategy::Fixed(fading_tabu_size))
    }

    /// Replaces the fixed tabu size, for example with an entity ratio.
    pub fn with_tabu_size_strategy(mut self, strategy: TabuSizeStrategy) -> Self {
        self.tabu_size_strategy = strategy;
        self.tabu_size = strategy.resolve(ProblemSize::default());
        self
    }

    pub fn with_fading_tabu_size_strategy(mut self, strategy: TabuSizeStrategy) -> Self {
        self.fading_tabu_size_strategy = strategy;
        self.fading_tabu_size = strategy.resolve(ProblemSize::default());
        self
    }

    pub fn with_aspiration(mut self, aspiration_enabled: bool) -> Self {
        self.aspiration_enabled = aspiration_enabled;
        self
    }

    /// Seeds the draws made inside the fading band.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Returns the tabu size resolved for the current step.
    pub fn tabu_size(&self) -> usize {
        self.tabu_size
    }

    pub fn fading_tabu_size(&self) -> usize {
        self.fading_tabu_size
    }

    pub fn aspiration_enabled(&self) -> bool {
        self.aspiration_enabled
    }

    /// Returns the number of keys currently remembered.
    pub fn tabu_count(&self) -> usize {
        self.tabu_to_step_index.len()
    }

    /// Returns the chance of accepting a key stamped `tabu_step_count`
    /// steps ago, with `tabu_size <= tabu_step_count < tabu_size +
    /// fading_tabu_size`.
    ///
    /// Stays strictly between 0 and 1 inside the fading band.
    fn fading_accept_chance(&self, tabu_step_count: u64) -> f64 {
        let fading_step_count = tabu_step_count - self.tabu_size as u64 + 1;
        fading_step_count as f64 / (self.fading_tabu_size + 1) as f64
    }

    /// Forgets the keys that are no longer tabu from the step after
    /// `step_index` on.
    fn evict_expired(&mut self, step_index: u64) {
        let window = (self.tabu_size + self.fading_tabu_size) as u64;
        while let Some(oldest) = self.tabu_sequence.front() {
            let stamped = self.tabu_to_step_index.get(oldest).copied().unwrap_or(0);
            if (step_index + 1).saturating_sub(stamped) < window {
                break;
            }
            if let Some(expired) = self.tabu_sequence.pop_front() {
                self.tabu_to_step_index.remove(&expired);
            }
        }
    }
}

impl<S: PlanningSolution, M: Move<S>, K: TabuKeySource<S, M>> Debug for TabuAcceptor<S, M, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabuAcceptor")
            .field("key_source", &self.key_source)
            .field("tabu_size", &self.tabu_size_strategy)
            .field("fading_tabu_size", &self.fading_tabu_size_strategy)
            .field("aspiration_enabled", &self.aspiration_enabled)
            .field("tabu_count", &self.tabu_to_step_index.len())
            .finish()
    }
}

impl<S, M, K> Acceptor<S, M> for TabuAcceptor<S, M, K>
where
    S: PlanningSolution,
    M: Move<S>,
    K: TabuKeySource<S, M>,
{
    fn phase_started(&mut self, _starting_score: &S::Score) -> Result<()> {
        self.tabu_size_strategy.validate()?;
        self.fading_tabu_size_strategy.validate()?;
        if self.tabu_size_strategy == TabuSizeStrategy::Fixed(0)
            && self.fading_tabu_size_strategy == TabuSizeStrategy::Fixed(0)
        {
            return Err(PlanforgeError::Config(
                "the tabu size plus the fading tabu size must be at least 1".to_string(),
            ));
        }
        self.tabu_to_step_index.clear();
        self.tabu_sequence.clear();
        Ok(())
    }

    fn step_started(&mut self, problem_size: ProblemSize) {
        self.tabu_size = self.tabu_size_strategy.resolve(problem_size);
        self.fading_tabu_size = self.fading_tabu_size_strategy.resolve(problem_size);
    }

    fn is_accepted(&mut self, candidate: &MoveCandidate<'_, S, M>) -> bool {
        let keys = self.key_source.candidate_keys(candidate);
        let Some(max_tabu_step_index) = keys
            .iter()
            .filter_map(|key| self.tabu_to_step_index.get(key).copied())
            .max()
        else {
            return true;
        };

        if self.aspiration_enabled && candidate.score > candidate.best_score {
            tracing::trace!(
                event = "tabu_aspiration",
                step = candidate.step_index,
                score = %candidate.score,
            );
            return true;
        }

        let tabu_step_count = candidate.step_index.saturating_sub(max_tabu_step_index);
        if tabu_step_count < self.tabu_size as u64 {
            return false;
        }
        if tabu_step_count >= (self.tabu_size + self.fading_tabu_size) as u64 {
            return true;
        }
        let accept_chance = self.fading_accept_chance(tabu_step_count);
        self.rng.random::<f64>() < accept_chance
    }

    fn step_ended(&mut self, outcome: &StepOutcome<'_, S, M>) {
        self.evict_expired(outcome.step_index);
        for key in self.key_source.step_keys(outcome) {
            if self
                .tabu_to_step_index
                .insert(key.clone(), outcome.step_index)
                .is_some()
            {
                self.tabu_sequence.retain(|old| old != &key);
            }
            self.tabu_sequence.push_back(key);
        }
    }

    fn phase_ended(&mut self) {
        self.tabu_to_step_index.clear();
        self.tabu_sequence.clear();
    }
}
