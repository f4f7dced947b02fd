//! Collection-wide task counts.

use super::percent::percentage;
use crate::task::domain::{Task, TaskStatus};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Counts over a whole task collection.
///
/// The status counts partition `todo`, `in_progress`, `done` and
/// `cancelled` only; tasks marked overdue by the sweep appear in `total`
/// but in none of them. `overdue` counts tasks that are logically overdue
/// ([`Task::is_overdue`]) regardless of their stored status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// Number of tasks.
    pub total: u64,
    /// Tasks in `Todo`.
    pub todo: u64,
    /// Tasks in `InProgress`.
    pub in_progress: u64,
    /// Tasks in `Done`.
    pub done: u64,
    /// Tasks in `Cancelled`.
    pub cancelled: u64,
    /// Tasks that are logically overdue today.
    pub overdue: u64,
}

impl TaskStatistics {
    /// Computes the counts for `tasks` as of the clock's current date.
    #[must_use]
    pub fn from_tasks(tasks: &[Task], clock: &impl Clock) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status() {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
                TaskStatus::Cancelled => stats.cancelled += 1,
                TaskStatus::Overdue => {}
            }
            if task.is_overdue(clock) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Returns `done / total * 100`, or `0.0` for an empty collection.
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        percentage(self.done, self.total)
    }
}
