//! Per-user completion metrics.

use super::percent::{mean, percentage};
use crate::task::domain::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Completion metrics for one user's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStatistics {
    /// Display name of the user.
    pub user_name: String,
    /// Tasks assigned to the user.
    pub total_tasks: u64,
    /// Tasks in `Done`.
    pub completed_tasks: u64,
    /// Tasks neither done nor cancelled.
    pub active_tasks: u64,
    /// Mean whole hours from creation to completion over done tasks.
    pub average_completion_hours: f64,
    /// Share of completed tasks finished on or before their due date.
    pub on_time_percentage: f64,
}

impl UserStatistics {
    /// Computes the metrics over `tasks`, which must all belong to the user.
    ///
    /// Each completion duration is truncated to whole hours before
    /// averaging. A completed task without a due date counts towards the
    /// on-time denominator but never the numerator.
    #[must_use]
    pub fn from_tasks(user_name: impl Into<String>, tasks: &[Task]) -> Self {
        let mut completed_tasks = 0_u64;
        let mut active_tasks = 0_u64;
        let mut timed_completions = 0_u64;
        let mut completion_hours = 0_i64;
        let mut completed_on_time = 0_u64;

        for task in tasks {
            let status = task.status();
            if !status.is_terminal() {
                active_tasks += 1;
            }
            if status != TaskStatus::Done {
                continue;
            }
            completed_tasks += 1;

            let Some(completed_at) = task.completed_at() else {
                continue;
            };
            timed_completions += 1;
            completion_hours = completion_hours
                .saturating_add((completed_at - task.created_at()).num_hours());
            if task
                .due_date()
                .is_some_and(|due| completed_at.date_naive() <= due)
            {
                completed_on_time += 1;
            }
        }

        Self {
            user_name: user_name.into(),
            total_tasks: u64::try_from(tasks.len()).unwrap_or(u64::MAX),
            completed_tasks,
            active_tasks,
            average_completion_hours: mean(completion_hours, timed_completions),
            on_time_percentage: percentage(completed_on_time, completed_tasks),
        }
    }
}
