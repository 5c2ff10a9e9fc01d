//! Partition queue: hands partition results from worker threads to the
//! merging thread.
//!
//! Every partition owns one slot. A new value overwrites the slot, so only
//! the freshest value of a partition is ever delivered. Partitions whose
//! slot went from empty to filled are queued in arrival order, which keeps
//! a busy partition from starving the others.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt::Debug;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use planforge_core::{PlanforgeError, Result};

/// Boxed cause of a partition failure.
pub type PartitionError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartitionState {
    /// May still produce values.
    Active,
    /// Produces nothing more; a pending value is still delivered.
    Finished,
    /// Failed; further values are ignored.
    Errored,
}

struct QueueState<T> {
    slots: Vec<Option<T>>,
    /// Partitions with a filled slot, in the order the slots were filled.
    ready: VecDeque<usize>,
    partitions: Vec<PartitionState>,
    part_calculation_counts: Vec<u64>,
    /// First failure; taken once it has been reported.
    error: Option<(usize, PartitionError)>,
}

impl<T> QueueState<T> {
    fn has_active_partition(&self) -> bool {
        self.partitions.contains(&PartitionState::Active)
    }

    fn pop_ready(&mut self) -> Option<T> {
        while let Some(partition_index) = self.ready.pop_front() {
            if let Some(value) = self.slots[partition_index].take() {
                return Some(value);
            }
        }
        None
    }
}

/// A blocking multi-producer, single-consumer queue of partition results.
///
/// Worker threads call [`add_move`](Self::add_move),
/// [`add_finish`](Self::add_finish) and
/// [`add_exception_thrown`](Self::add_exception_thrown) and never block.
/// One consumer drains it with [`next_move`](Self::next_move) or
/// [`iter`](Self::iter), which block until a value arrives or every
/// partition is done.
///
/// # Example
///
/// ```
/// use planforge_solver::PartitionQueue;
///
/// let queue = PartitionQueue::new(2);
/// queue.add_move(1, "b1");
/// queue.add_move(1, "b2");
/// queue.add_move(0, "a1");
/// queue.add_finish(0, 10);
/// queue.add_finish(1, 20);
///
/// let delivered: Vec<_> = queue.iter().map(|r| r.unwrap()).collect();
/// assert_eq!(delivered, vec!["b2", "a1"]);
/// assert_eq!(queue.part_calculation_count(), 30);
/// ```
pub struct PartitionQueue<T> {
    state: Mutex<QueueState<T>>,
    changed: Condvar,
}

impl<T> PartitionQueue<T> {
    /// Creates a queue for `partition_count` active partitions.
    pub fn new(partition_count: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                slots: (0..partition_count).map(|_| None).collect(),
                ready: VecDeque::with_capacity(partition_count),
                partitions: vec![PartitionState::Active; partition_count],
                part_calculation_counts: vec![0; partition_count],
                error: None,
            }),
            changed: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, QueueState<T>>) -> MutexGuard<'a, QueueState<T>> {
        self.changed
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn partition_count(&self) -> usize {
        self.lock().partitions.len()
    }

    /// Stores the latest value of a partition, replacing any undelivered one.
    ///
    /// Ignored for failed partitions and unknown indices.
    pub fn add_move(&self, partition_index: usize, value: T) {
        let mut state = self.lock();
        if !matches!(
            state.partitions.get(partition_index),
            Some(PartitionState::Active | PartitionState::Finished)
        ) {
            return;
        }
        if state.slots[partition_index].replace(value).is_none() {
            state.ready.push_back(partition_index);
        }
        drop(state);
        self.changed.notify_all();
    }

    /// Marks a partition as finished and records its score calculation count.
    pub fn add_finish(&self, partition_index: usize, part_calculation_count: u64) {
        let mut state = self.lock();
        if let Some(partition) = state.partitions.get_mut(partition_index) {
            if *partition == PartitionState::Active {
                *partition = PartitionState::Finished;
            }
            state.part_calculation_counts[partition_index] = part_calculation_count;
        }
        drop(state);
        self.changed.notify_all();
    }

    /// Marks a partition as failed. Only the first failure is kept.
    pub fn add_exception_thrown(&self, partition_index: usize, cause: impl Into<PartitionError>) {
        let mut state = self.lock();
        if let Some(partition) = state.partitions.get_mut(partition_index) {
            *partition = PartitionState::Errored;
        }
        if state.error.is_none() {
            state.error = Some((partition_index, cause.into()));
        }
        drop(state);
        self.changed.notify_all();
    }

    /// Blocks until a value is ready or no partition is active.
    ///
    /// Returns `Ok(true)` if a value is ready and `Ok(false)` once every
    /// partition is done. If a partition failed, the failure is returned
    /// once, after every value queued before it has been consumed.
    pub fn has_next(&self) -> Result<bool> {
        let mut state = self.lock();
        loop {
            if !state.ready.is_empty() {
                return Ok(true);
            }
            if !state.has_active_partition() {
                return match state.error.take() {
                    Some((partition_index, cause)) => Err(PlanforgeError::PartitionFailed {
                        partition_index,
                        cause,
                    }),
                    None => Ok(false),
                };
            }
            state = self.wait(state);
        }
    }

    /// Blocks until a value is ready and returns it.
    ///
    /// Returns `None` once no partition is active and nothing is queued.
    /// Failures are not reported; use [`has_next`](Self::has_next) or
    /// [`next_move`](Self::next_move) for that.
    pub fn next(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(value) = state.pop_ready() {
                return Some(value);
            }
            if !state.has_active_partition() {
                return None;
            }
            state = self.wait(state);
        }
    }

    /// Combines [`has_next`](Self::has_next) and [`next`](Self::next)
    /// under one lock.
    pub fn next_move(&self) -> Result<Option<T>> {
        let mut state = self.lock();
        loop {
            if let Some(value) = state.pop_ready() {
                return Ok(Some(value));
            }
            if !state.has_active_partition() {
                return match state.error.take() {
                    Some((partition_index, cause)) => Err(PlanforgeError::PartitionFailed {
                        partition_index,
                        cause,
                    }),
                    None => Ok(None),
                };
            }
            state = self.wait(state);
        }
    }

    /// Returns a blocking iterator over the delivered values.
    pub fn iter(&self) -> PartitionQueueIter<'_, T> {
        PartitionQueueIter { queue: self }
    }

    /// Returns the summed score calculation count of finished partitions.
    pub fn part_calculation_count(&self) -> u64 {
        self.lock().part_calculation_counts.iter().sum()
    }
}

impl<T> Debug for PartitionQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PartitionQueue")
            .field("partitions", &state.partitions)
            .field("ready", &state.ready)
            .field("has_error", &state.error.is_some())
            .finish()
    }
}

/// Blocking iterator returned by [`PartitionQueue::iter`].
///
/// Yields `Err` at most once, after which it ends.
pub struct PartitionQueueIter<'a, T> {
    queue: &'a PartitionQueue<T>,
}

impl<T> Iterator for PartitionQueueIter<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        self.queue.next_move().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_coalescing_fifo_of_dirty_slots() {
        let queue = PartitionQueue::new(3);

        queue.add_move(0, "A1");
        assert_eq!(queue.next(), Some("A1"));

        queue.add_move(1, "B1");
        queue.add_move(1, "B2");
        queue.add_move(1, "B3");
        assert_eq!(queue.next(), Some("B3"));

        queue.add_move(0, "A2");
        queue.add_move(0, "A3");
        queue.add_move(1, "B4");
        assert_eq!(queue.next(), Some("A3"));
        assert_eq!(queue.next(), Some("B4"));
    }

    #[test]
    fn test_slot_is_requeued_after_drain() {
        let queue = PartitionQueue::new(2);
        queue.add_move(1, 10);
        queue.add_move(0, 20);
        assert_eq!(queue.next(), Some(10));

        queue.add_move(1, 11);
        assert_eq!(queue.next(), Some(20));
        assert_eq!(queue.next(), Some(11));
    }

    #[test]
    fn test_finished_partition_still_delivers_pending_value() {
        let queue = PartitionQueue::new(2);
        queue.add_move(0, "last");
        queue.add_finish(0, 5);
        queue.add_finish(1, 7);

        assert!(queue.has_next().unwrap());
        assert_eq!(queue.next(), Some("last"));
        assert!(!queue.has_next().unwrap());
        assert_eq!(queue.next(), None);
        assert_eq!(queue.part_calculation_count(), 12);
    }

    #[test]
    fn test_failure_reported_once_after_queued_values() {
        let queue = PartitionQueue::new(2);
        queue.add_move(0, 1);
        queue.add_exception_thrown(1, "partition 1 exploded");
        queue.add_finish(0, 0);

        assert!(queue.has_next().unwrap());
        assert_eq!(queue.next(), Some(1));

        match queue.has_next() {
            Err(err @ PlanforgeError::PartitionFailed { .. }) => {
                assert!(err.to_string().contains("partition index (1)"));
                assert_eq!(
                    err.source().map(|cause| cause.to_string()),
                    Some("partition 1 exploded".to_string())
                );
            }
            other => panic!("expected a partition failure, got {other:?}"),
        }
        assert!(!queue.has_next().unwrap());
    }

    #[test]
    fn test_first_failure_is_sticky() {
        let queue: PartitionQueue<u32> = PartitionQueue::new(2);
        queue.add_exception_thrown(1, "first");
        queue.add_exception_thrown(0, "second");

        match queue.next_move() {
            Err(PlanforgeError::PartitionFailed {
                partition_index,
                cause,
            }) => {
                assert_eq!(partition_index, 1);
                assert_eq!(cause.to_string(), "first");
            }
            other => panic!("expected a partition failure, got {other:?}"),
        }
        assert!(queue.next_move().unwrap().is_none());
    }

    #[test]
    fn test_failed_partition_is_ignored() {
        let queue = PartitionQueue::new(2);
        queue.add_exception_thrown(0, "boom");
        queue.add_move(0, "late");
        queue.add_move(1, "fresh");
        queue.add_finish(1, 0);

        let delivered: Vec<Result<&str>> = queue.iter().collect();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].as_ref().ok(), Some(&"fresh"));
        assert!(delivered[1].is_err());
    }

    #[test]
    fn test_failure_waits_for_active_partitions() {
        let queue = Arc::new(PartitionQueue::new(2));
        queue.add_exception_thrown(0, "boom");

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.add_move(1, 42);
                queue.add_finish(1, 3);
            })
        };

        assert_eq!(queue.next_move().unwrap(), Some(42));
        assert!(queue.next_move().is_err());
        producer.join().unwrap();
    }

    #[test]
    fn test_consumer_blocks_until_producer_delivers() {
        let queue = Arc::new(PartitionQueue::new(1));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.next())
        };

        thread::sleep(Duration::from_millis(20));
        queue.add_move(0, "late arrival");
        assert_eq!(consumer.join().unwrap(), Some("late arrival"));
    }

    #[test]
    fn test_concurrent_producers_deliver_freshest_values() {
        const PARTITIONS: usize = 4;
        const UPDATES: u32 = 1000;

        let queue = Arc::new(PartitionQueue::new(PARTITIONS));
        let producers: Vec<_> = (0..PARTITIONS)
            .map(|partition_index| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for update in 0..UPDATES {
                        queue.add_move(partition_index, (partition_index, update));
                    }
                    queue.add_finish(partition_index, u64::from(UPDATES));
                })
            })
            .collect();

        let mut last_seen: Vec<Option<u32>> = vec![None; PARTITIONS];
        for delivered in queue.iter() {
            let (partition_index, update) = delivered.unwrap();
            if let Some(previous) = last_seen[partition_index] {
                assert!(update > previous);
            }
            last_seen[partition_index] = Some(update);
        }
        for producer in producers {
            producer.join().unwrap();
        }

        assert_eq!(last_seen, vec![Some(UPDATES - 1); PARTITIONS]);
        assert_eq!(queue.part_calculation_count(), 4000);
    }
}
