//! Aggregations over a task collection.
//!
//! Every function here is a pure, single pass over a slice of tasks. Order never
//! changes a count; it only matters for `pending_tasks`, which preserves it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::fields::*;
use crate::task::Task;

/// Task totals partitioned by status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub done: usize,
    pub pending: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.done + self.pending
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Done => self.done += 1,
            Status::Pending => self.pending += 1,
        }
    }
}

/// Count tasks by status.
pub fn count_by_status(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        counts.record(task.status);
    }
    counts
}

/// Count tasks for every (priority, status) pair. Pairs with no tasks map to 0.
pub fn count_by_priority_and_status(tasks: &[Task]) -> BTreeMap<(Priority, Status), usize> {
    let mut counts: BTreeMap<(Priority, Status), usize> = Priority::ALL
        .iter()
        .flat_map(|&p| Status::ALL.iter().map(move |&s| ((p, s), 0)))
        .collect();
    for task in tasks {
        *counts.entry((task.priority, task.status)).or_default() += 1;
    }
    counts
}

/// Number of pending tasks in the given priority class.
pub fn count_pending_with(tasks: &[Task], priority: Priority) -> usize {
    tasks
        .iter()
        .filter(|t| t.priority == priority && t.status == Status::Pending)
        .count()
}

/// Whether every task in the given priority class is done.
/// Vacuously true when the class is empty.
pub fn all_done_with(tasks: &[Task], priority: Priority) -> bool {
    tasks
        .iter()
        .filter(|t| t.priority == priority)
        .all(Task::is_done)
}

pub fn count_high_priority_pending(tasks: &[Task]) -> usize {
    count_pending_with(tasks, Priority::High)
}

pub fn all_high_priority_done(tasks: &[Task]) -> bool {
    all_done_with(tasks, Priority::High)
}

/// Pending tasks in their original order.
pub fn pending_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.status == Status::Pending)
        .collect()
}

/// Done/pending split for one priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityRow {
    pub priority: Priority,
    pub done: usize,
    pub pending: usize,
}

/// Summary of a task collection, ready to print or serialise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: Vec<PriorityRow>,
    pub high_priority_pending: usize,
    pub all_high_priority_done: bool,
}

impl TaskReport {
    pub fn build(tasks: &[Task]) -> Self {
        let matrix = count_by_priority_and_status(tasks);
        let by_priority = Priority::ALL
            .iter()
            .map(|&priority| PriorityRow {
                priority,
                done: matrix[&(priority, Status::Done)],
                pending: matrix[&(priority, Status::Pending)],
            })
            .collect();
        TaskReport {
            total: tasks.len(),
            by_status: count_by_status(tasks),
            by_priority,
            high_priority_pending: count_high_priority_pending(tasks),
            all_high_priority_done: all_high_priority_done(tasks),
        }
    }
}
