//! Batch passes that mark overdue tasks and send deadline reminders.
//!
//! Both sweeps are driven from outside (see the `taskboard-sweeper` binary);
//! this module owns what a single run does, not when it runs.

use crate::error::ErrorKind;
use crate::notification::{NotificationError, NotificationSink};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Outcome of one overdue sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverdueSweepReport {
    /// Open tasks past their due date.
    pub examined: usize,
    /// Tasks newly marked overdue and notified.
    pub marked: usize,
    /// Tasks already marked overdue, or claimed by a concurrent writer.
    pub skipped: usize,
}

/// Outcome of one deadline reminder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderSweepReport {
    /// Reminders sent.
    pub reminded: usize,
}

/// Errors that abort a sweep run.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The notification sink failed.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl SweepError {
    /// Classifies the error for the caller.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Repository(TaskRepositoryError::VersionConflict { .. }) => ErrorKind::Conflict,
            Self::Repository(_) | Self::Notification(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for sweep runs.
pub type SweepResult<T> = Result<T, SweepError>;

/// Runs the overdue and deadline reminder sweeps.
#[derive(Clone)]
pub struct DeadlineSweepService<R, N, C>
where
    R: TaskRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, N, C> DeadlineSweepService<R, N, C>
where
    R: TaskRepository,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new sweep service.
    #[must_use]
    pub const fn new(repository: Arc<R>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            notifier,
            clock,
        }
    }

    /// Marks every open task past its due date as overdue and notifies its
    /// assignee.
    ///
    /// Tasks already marked overdue are skipped, so back-to-back runs notify
    /// once. A task whose update loses a version race is also skipped: the
    /// concurrent writer has already handled it.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError`] on the first repository or notification
    /// failure. Tasks processed before the failure stay marked; the task
    /// whose notice failed is restored so the next run picks it up again.
    pub async fn run_overdue_sweep(&self) -> SweepResult<OverdueSweepReport> {
        let today = self.clock.utc().date_naive();
        let candidates = self.repository.find_overdue(today).await?;
        let mut report = OverdueSweepReport {
            examined: candidates.len(),
            ..OverdueSweepReport::default()
        };

        for mut task in candidates {
            if task.status() == TaskStatus::Overdue {
                report.skipped += 1;
                continue;
            }

            let snapshot = task.clone();
            task.mark_overdue(&*self.clock);
            match self.repository.update(&task).await {
                Ok(()) => {}
                Err(TaskRepositoryError::VersionConflict { task_id, .. }) => {
                    tracing::debug!(%task_id, "task changed during overdue sweep, skipping");
                    report.skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            if let Err(err) = self.notifier.overdue_task(&task).await {
                self.restore(task, snapshot).await;
                return Err(err.into());
            }
            report.marked += 1;
        }

        tracing::info!(
            examined = report.examined,
            marked = report.marked,
            skipped = report.skipped,
            "overdue sweep finished"
        );
        Ok(report)
    }

    async fn restore(&self, mut marked: Task, snapshot: Task) {
        let task_id = marked.id();
        let status = snapshot.status();
        marked.revert_to(snapshot);
        match self.repository.update(&marked).await {
            Ok(()) => tracing::warn!(%task_id, %status, "overdue notice failed, status restored"),
            Err(err) => tracing::error!(
                %task_id,
                error = %err,
                "failed to restore status after overdue notice failed"
            ),
        }
    }

    /// Sends a reminder for every open task due within `window_days` of
    /// today, inclusive. No task is modified.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError`] on the first repository or notification
    /// failure.
    pub async fn run_deadline_reminders(
        &self,
        window_days: u32,
    ) -> SweepResult<ReminderSweepReport> {
        let today = self.clock.utc().date_naive();
        let due_soon = self.repository.find_due_soon(window_days, today).await?;

        for task in &due_soon {
            self.notifier.upcoming_deadline(task).await?;
        }

        let report = ReminderSweepReport {
            reminded: due_soon.len(),
        };
        tracing::info!(reminded = report.reminded, window_days, "deadline reminders sent");
        Ok(report)
    }
}
