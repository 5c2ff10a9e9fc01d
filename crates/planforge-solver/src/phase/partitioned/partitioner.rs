//! Solution partitioner for dividing problems into independent sub-problems.
//!
//! Partitioners split a large problem into smaller pieces that can be
//! solved independently on their own threads, and copy the result of a
//! solved piece back into the parent solution.

use std::fmt::Debug;
use std::marker::PhantomData;

use planforge_core::PlanningSolution;

/// Splits a solution into independent partitions for parallel solving.
///
/// Each partition should be solvable independently without affecting
/// the correctness of other partitions: no planning entity may belong to
/// two partitions.
///
/// # Type Parameters
///
/// - `S`: The planning solution type
///
/// # Example
///
/// For a machine assignment problem, a natural partitioning is by
/// machine group, where each partition contains the tasks and machines
/// of one group.
pub trait SolutionPartitioner<S: PlanningSolution>: Send + Sync + Debug {
    /// Splits the solution into independent partitions.
    ///
    /// The union of all partitions should cover all entities in the
    /// original solution.
    fn partition(&self, solution: &S) -> Vec<S>;

    /// Copies the planning variables of a solved partition into `parent`.
    ///
    /// Called every time partition `partition_index` finds a new best
    /// solution, so it must only touch that partition's entities.
    fn merge_partition(&self, parent: &mut S, partition_index: usize, partition: &S);
}

/// A partitioner built from two closures.
///
/// # Example
///
/// ```
/// use planforge_solver::{FunctionalPartitioner, SolutionPartitioner};
/// use planforge_test::assignment::{merge_group, partition_by_group};
/// use planforge_test::TaskAssignment;
///
/// let partitioner = FunctionalPartitioner::new(partition_by_group, merge_group);
/// let solution = TaskAssignment::generate(3, 2, 4, 4);
/// assert_eq!(partitioner.partition(&solution).len(), 3);
/// ```
pub struct FunctionalPartitioner<S, PF, MF> {
    partition_fn: PF,
    merge_fn: MF,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, PF, MF> FunctionalPartitioner<S, PF, MF>
where
    S: PlanningSolution,
    PF: Fn(&S) -> Vec<S> + Send + Sync,
    MF: Fn(&mut S, usize, &S) + Send + Sync,
{
    /// Creates a new functional partitioner.
    pub fn new(partition_fn: PF, merge_fn: MF) -> Self {
        Self {
            partition_fn,
            merge_fn,
            _phantom: PhantomData,
        }
    }
}

impl<S, PF, MF> Debug for FunctionalPartitioner<S, PF, MF> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionalPartitioner").finish()
    }
}

impl<S, PF, MF> SolutionPartitioner<S> for FunctionalPartitioner<S, PF, MF>
where
    S: PlanningSolution,
    PF: Fn(&S) -> Vec<S> + Send + Sync,
    MF: Fn(&mut S, usize, &S) + Send + Sync,
{
    fn partition(&self, solution: &S) -> Vec<S> {
        (self.partition_fn)(solution)
    }

    fn merge_partition(&self, parent: &mut S, partition_index: usize, partition: &S) {
        (self.merge_fn)(parent, partition_index, partition);
    }
}
