//! Task assignment test fixtures.
//!
//! Tasks are assigned to machines. Every task and machine belongs to a
//! group and tasks may only run on machines of their own group, so each
//! group is an independent sub-problem. This makes the problem a natural
//! fit for partitioned search.
//!
//! The score is a `HardSoftScore`: hard counts capacity overload, soft
//! penalizes the squared load of every machine (balancing).

use planforge_core::{HardSoftScore, PlanningSolution};
use planforge_scoring::SimpleScoreDirector;

/// A machine with a fixed capacity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Machine {
    pub id: usize,
    pub group: usize,
    pub capacity: i64,
}

/// A task; `machine` (a machine id) is the planning variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Task {
    pub id: usize,
    pub group: usize,
    pub duration: i64,
    pub machine: Option<usize>,
}

/// Task assignment solution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskAssignment {
    pub machines: Vec<Machine>,
    pub tasks: Vec<Task>,
    pub score: Option<HardSoftScore>,
}

impl TaskAssignment {
    /// Builds `groups` groups, each with `machines_per_group` machines of
    /// `capacity` and `tasks_per_group` unit-length tasks all placed on the
    /// group's first machine.
    pub fn generate(
        groups: usize,
        machines_per_group: usize,
        tasks_per_group: usize,
        capacity: i64,
    ) -> Self {
        let mut machines = Vec::new();
        let mut tasks = Vec::new();
        for group in 0..groups {
            let first_machine = machines.len();
            for _ in 0..machines_per_group {
                machines.push(Machine {
                    id: machines.len(),
                    group,
                    capacity,
                });
            }
            for _ in 0..tasks_per_group {
                tasks.push(Task {
                    id: tasks.len(),
                    group,
                    duration: 1,
                    machine: Some(first_machine),
                });
            }
        }
        Self {
            machines,
            tasks,
            score: None,
        }
    }

    /// Returns the ids of the machines a task of `group` may use.
    pub fn machine_ids_in_group(&self, group: usize) -> Vec<usize> {
        self.machines
            .iter()
            .filter(|m| m.group == group)
            .map(|m| m.id)
            .collect()
    }

    /// Returns the ids of every machine in this (possibly partial) solution.
    pub fn machine_ids(&self) -> Vec<usize> {
        self.machines.iter().map(|m| m.id).collect()
    }

    fn group_count(&self) -> usize {
        self.machines
            .iter()
            .map(|m| m.group + 1)
            .max()
            .unwrap_or(0)
    }
}

impl PlanningSolution for TaskAssignment {
    type Score = HardSoftScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

/// Typed getter for the `machine` variable.
pub fn get_task_machine(s: &TaskAssignment, idx: usize) -> Option<usize> {
    s.tasks.get(idx).and_then(|t| t.machine)
}

/// Typed setter for the `machine` variable.
pub fn set_task_machine(s: &mut TaskAssignment, idx: usize, v: Option<usize>) {
    if let Some(task) = s.tasks.get_mut(idx) {
        task.machine = v;
    }
}

/// Returns the number of tasks.
pub fn task_count(s: &TaskAssignment) -> usize {
    s.tasks.len()
}

/// Scores overload (hard) and squared machine load (soft).
pub fn calculate_score(solution: &TaskAssignment) -> HardSoftScore {
    let mut unassigned = 0i64;
    let mut hard = 0i64;
    let mut soft = 0i64;

    for task in &solution.tasks {
        if task.machine.is_none() {
            unassigned += 1;
        }
    }
    for machine in &solution.machines {
        let load: i64 = solution
            .tasks
            .iter()
            .filter(|t| t.machine == Some(machine.id))
            .map(|t| t.duration)
            .sum();
        if load > machine.capacity {
            hard -= load - machine.capacity;
        }
        soft -= load * load;
    }

    HardSoftScore::of_uninitialized(-unassigned, hard, soft)
}

/// Splits the solution into one partition per group.
pub fn partition_by_group(solution: &TaskAssignment) -> Vec<TaskAssignment> {
    (0..solution.group_count())
        .map(|group| TaskAssignment {
            machines: solution
                .machines
                .iter()
                .filter(|m| m.group == group)
                .cloned()
                .collect(),
            tasks: solution
                .tasks
                .iter()
                .filter(|t| t.group == group)
                .cloned()
                .collect(),
            score: None,
        })
        .collect()
}

/// Copies the assignments of a solved partition back into the parent.
pub fn merge_group(parent: &mut TaskAssignment, _partition_index: usize, part: &TaskAssignment) {
    for task in &part.tasks {
        if let Some(target) = parent.tasks.iter_mut().find(|t| t.id == task.id) {
            target.machine = task.machine;
        }
    }
}

/// Director type produced by [`create_assignment_director`].
pub type AssignmentDirector =
    SimpleScoreDirector<TaskAssignment, fn(&TaskAssignment) -> HardSoftScore>;

/// Creates a director for a task assignment solution.
pub fn create_assignment_director(solution: TaskAssignment) -> AssignmentDirector {
    SimpleScoreDirector::new(solution, calculate_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::Score;

    #[test]
    fn test_generate_places_all_tasks_on_first_machine() {
        let solution = TaskAssignment::generate(2, 3, 4, 2);
        assert_eq!(solution.machines.len(), 6);
        assert_eq!(solution.tasks.len(), 8);
        assert_eq!(solution.machine_ids_in_group(1), vec![3, 4, 5]);
        // 4 unit tasks on a capacity 2 machine, twice
        assert_eq!(calculate_score(&solution), HardSoftScore::of(-4, -32));
    }

    #[test]
    fn test_partition_and_merge_round_trip() {
        let mut solution = TaskAssignment::generate(3, 2, 2, 5);
        let mut parts = partition_by_group(&solution);
        assert_eq!(parts.len(), 3);
        assert!(parts[2].tasks.iter().all(|t| t.group == 2));

        set_task_machine(&mut parts[2], 0, Some(5));
        merge_group(&mut solution, 2, &parts[2]);
        assert_eq!(solution.tasks[4].machine, Some(5));
        assert_eq!(solution.tasks[5].machine, Some(4));
    }

    #[test]
    fn test_unassigned_tasks_lower_init_score() {
        let mut solution = TaskAssignment::generate(1, 1, 2, 5);
        set_task_machine(&mut solution, 0, None);
        assert_eq!(calculate_score(&solution).init_score(), -1);
    }
}
