//! Open-task counts per priority.

use crate::task::domain::{Task, TaskPriority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of open tasks per priority, ordered from low to urgent.
///
/// Only priorities with at least one open task are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityDistribution(BTreeMap<TaskPriority, u64>);

impl PriorityDistribution {
    /// Groups the tasks that are neither done nor cancelled by priority.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = BTreeMap::new();
        for task in tasks.iter().filter(|task| !task.status().is_terminal()) {
            *counts.entry(task.priority()).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Returns the count for `priority`, or `None` when no open task has it.
    #[must_use]
    pub fn get(&self, priority: TaskPriority) -> Option<u64> {
        self.0.get(&priority).copied()
    }

    /// Iterates over `(priority, count)` pairs from low to urgent.
    pub fn iter(&self) -> impl Iterator<Item = (TaskPriority, u64)> + '_ {
        self.0.iter().map(|(priority, count)| (*priority, *count))
    }

    /// Returns the number of priorities present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no open tasks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
