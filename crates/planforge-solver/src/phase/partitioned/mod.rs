//! Partitioned search phase for parallel solving.
//!
//! Partitioned search splits a large problem into independent sub-problems
//! (partitions), solves each one on a worker thread with its own score
//! director and phase, and merges every new partition best into the parent
//! working solution as it arrives.
//!
//! # Usage
//!
//! 1. Define a partitioner that knows how to split and merge your solution type
//! 2. Provide factories for the partition score director and phase
//! 3. Run the phase; it returns once every partition is done

mod partitioner;
mod queue;

use std::any::Any;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use tracing::{debug, info, warn};

use planforge_config::ThreadCount;
use planforge_core::{PlanningSolution, Result};
use planforge_scoring::ScoreDirector;

use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

pub use partitioner::{FunctionalPartitioner, SolutionPartitioner};
pub use queue::{PartitionError, PartitionQueue, PartitionQueueIter};

/// A new best solution of one partition, to be merged into the parent.
#[derive(Debug, Clone)]
pub struct PartitionChangeMove<S> {
    pub partition_index: usize,
    pub solution: S,
}

impl<S: PlanningSolution> PartitionChangeMove<S> {
    /// Merges the partition solution into the director's working solution.
    pub fn apply<D, P>(&self, score_director: &mut D, partitioner: &P)
    where
        D: ScoreDirector<S>,
        P: SolutionPartitioner<S> + ?Sized,
    {
        let mut parent = score_director.clone_working_solution();
        partitioner.merge_partition(&mut parent, self.partition_index, &self.solution);
        score_director.set_working_solution(parent);
    }
}

/// Partitioned search phase that solves partitions in parallel.
///
/// # Type Parameters
/// * `S` - The planning solution type
/// * `PD` - The score director type used inside a partition
/// * `Ph` - The phase run on every partition
/// * `P` - The partitioner
/// * `DF` - Builds a partition score director from a partition solution
/// * `PF` - Builds the phase for a partition from its index and solution;
///   derive per-partition random seeds from the index here. An error fails
///   that partition like an error from the phase itself
///
/// A failing or panicking partition stops the other partitions; the
/// phase then returns [`PlanforgeError::PartitionFailed`] once every
/// update already produced has been merged.
///
/// [`PlanforgeError::PartitionFailed`]: planforge_core::PlanforgeError::PartitionFailed
pub struct PartitionedSearchPhase<S, PD, Ph, P, DF, PF> {
    partitioner: P,
    director_factory: DF,
    phase_factory: PF,
    thread_count: ThreadCount,
    _phantom: PhantomData<fn() -> (S, PD, Ph)>,
}

impl<S, PD, Ph, P, DF, PF> PartitionedSearchPhase<S, PD, Ph, P, DF, PF>
where
    S: PlanningSolution,
    PD: ScoreDirector<S>,
    Ph: Phase<S, PD>,
    P: SolutionPartitioner<S>,
    DF: Fn(S) -> PD + Send + Sync,
    PF: Fn(usize, &S) -> Result<Ph> + Send + Sync,
{
    /// Creates a new partitioned search phase.
    pub fn new(partitioner: P, director_factory: DF, phase_factory: PF) -> Self {
        Self {
            partitioner,
            director_factory,
            phase_factory,
            thread_count: ThreadCount::default(),
            _phantom: PhantomData,
        }
    }

    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    pub fn thread_count(&self) -> ThreadCount {
        self.thread_count
    }

    /// Solves one partition and returns its score calculation count.
    fn solve_partition(
        &self,
        partition_index: usize,
        partition: S,
        queue: &Arc<PartitionQueue<PartitionChangeMove<S>>>,
        terminate_flags: &[Arc<AtomicBool>],
        parent: &PartitionBudget,
    ) -> Result<u64> {
        let director = (self.director_factory)(partition);
        let mut solver_scope = SolverScope::new(director);
        if let Some(remaining) = parent.remaining_time {
            solver_scope = solver_scope.with_time_limit(remaining);
        }

        let listener_queue = Arc::clone(queue);
        solver_scope = solver_scope.with_best_solution_listener(Box::new(move |solution, _| {
            listener_queue.add_move(
                partition_index,
                PartitionChangeMove {
                    partition_index,
                    solution: solution.clone(),
                },
            );
        }));
        for flag in terminate_flags {
            solver_scope.add_terminate_flag(Arc::clone(flag));
        }
        solver_scope.start_solving();

        let mut phase = (self.phase_factory)(partition_index, solver_scope.working_solution())?;
        phase.solve(&mut solver_scope)?;
        Ok(solver_scope.calculation_count())
    }

    /// Pulls partitions until none are left.
    ///
    /// Once `abort` is raised, remaining partitions are finished unsolved.
    fn run_worker(
        &self,
        partitions: &[Mutex<Option<S>>],
        next_partition: &AtomicUsize,
        queue: &Arc<PartitionQueue<PartitionChangeMove<S>>>,
        abort: &Arc<AtomicBool>,
        terminate_flags: &[Arc<AtomicBool>],
        budget: &PartitionBudget,
    ) {
        loop {
            let partition_index = next_partition.fetch_add(1, Ordering::SeqCst);
            let Some(slot) = partitions.get(partition_index) else {
                return;
            };
            let partition = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            let Some(partition) = partition else {
                queue.add_finish(partition_index, 0);
                continue;
            };
            if abort.load(Ordering::SeqCst) {
                debug!(event = "partition_skipped", partition_index);
                queue.add_finish(partition_index, 0);
                continue;
            }

            info!(event = "partition_start", partition_index);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                self.solve_partition(partition_index, partition, queue, terminate_flags, budget)
            }));
            match outcome {
                Ok(Ok(calculation_count)) => {
                    info!(
                        event = "partition_end",
                        partition_index,
                        calculation_count,
                    );
                    queue.add_finish(partition_index, calculation_count);
                }
                Ok(Err(err)) => {
                    warn!(event = "partition_failed", partition_index, error = %err);
                    abort.store(true, Ordering::SeqCst);
                    queue.add_exception_thrown(partition_index, err);
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(event = "partition_failed", partition_index, error = %message);
                    abort.store(true, Ordering::SeqCst);
                    queue.add_exception_thrown(partition_index, message);
                }
            }
        }
    }

    /// Merges partition updates into the parent until the queue drains.
    fn merge_updates<D: ScoreDirector<S>>(
        &self,
        phase_scope: &mut PhaseScope<'_, S, D>,
        queue: &PartitionQueue<PartitionChangeMove<S>>,
    ) -> Result<()> {
        for change in queue.iter() {
            let change = change?;
            change.apply(phase_scope.score_director_mut(), &self.partitioner);
            let score = phase_scope.calculate_score();
            phase_scope.increment_step_count();
            if phase_scope.update_best_solution() {
                debug!(
                    event = "step",
                    step = phase_scope.step_count(),
                    partition_index = change.partition_index,
                    score = %score,
                );
            }
        }
        Ok(())
    }
}

/// Limits the parent passes on to every partition.
struct PartitionBudget {
    remaining_time: Option<std::time::Duration>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("partition panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("partition panicked: {message}")
    } else {
        "partition panicked".to_string()
    }
}

impl<S, PD, Ph, P: Debug, DF, PF> Debug for PartitionedSearchPhase<S, PD, Ph, P, DF, PF> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionedSearchPhase")
            .field("partitioner", &self.partitioner)
            .field("thread_count", &self.thread_count)
            .finish()
    }
}

impl<S, D, PD, Ph, P, DF, PF> Phase<S, D> for PartitionedSearchPhase<S, PD, Ph, P, DF, PF>
where
    S: PlanningSolution,
    D: ScoreDirector<S>,
    PD: ScoreDirector<S>,
    Ph: Phase<S, PD>,
    P: SolutionPartitioner<S>,
    DF: Fn(S) -> PD + Send + Sync,
    PF: Fn(usize, &S) -> Result<Ph> + Send + Sync,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<S, D>) -> Result<()> {
        let partitions = self.partitioner.partition(solver_scope.working_solution());
        let partition_count = partitions.len();
        let phase_index = solver_scope.next_phase_index();
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index);
        phase_scope.calculate_score();
        phase_scope.update_best_solution();
        if partition_count == 0 {
            return Ok(());
        }

        let thread_count = self.thread_count.resolve(partition_count);
        info!(
            event = "phase_start",
            phase = "Partitioned Search",
            phase_index = phase_scope.phase_index(),
            partition_count,
            thread_count,
        );

        let queue = Arc::new(PartitionQueue::new(partition_count));
        let abort = Arc::new(AtomicBool::new(false));
        let mut terminate_flags = phase_scope.solver_scope().terminate_flags().to_vec();
        terminate_flags.push(Arc::clone(&abort));
        let budget = PartitionBudget {
            remaining_time: phase_scope.solver_scope().remaining_time(),
        };
        let partitions: Vec<Mutex<Option<S>>> =
            partitions.into_iter().map(|p| Mutex::new(Some(p))).collect();
        let next_partition = AtomicUsize::new(0);

        let this = &*self;
        let result = thread::scope(|scope| {
            for _ in 0..thread_count {
                scope.spawn(|| {
                    this.run_worker(
                        &partitions,
                        &next_partition,
                        &queue,
                        &abort,
                        &terminate_flags,
                        &budget,
                    );
                });
            }
            let merged = this.merge_updates(&mut phase_scope, &queue);
            if merged.is_err() {
                abort.store(true, Ordering::SeqCst);
            }
            merged
        });

        let best_score = phase_scope
            .best_score()
            .map_or_else(|| "N/A".to_string(), |score| score.to_string());
        info!(
            event = "phase_end",
            phase = "Partitioned Search",
            phase_index = phase_scope.phase_index(),
            duration_ms = phase_scope.elapsed().as_millis() as u64,
            steps = phase_scope.step_count(),
            part_calculation_count = queue.part_calculation_count(),
            score = best_score,
        );
        result
    }

    fn phase_type_name(&self) -> &'static str {
        "PartitionedSearch"
    }
}
