//! Repository port for task persistence and predicate lookups.

use crate::task::domain::{Task, TaskId, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Date-based lookups take `today` from the caller so that the service's
/// injected clock, not the store's wall clock, decides what "now" is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// The write is accepted only when the stored version is exactly one
    /// below `task.version()`, so two writers that loaded the same version
    /// cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::VersionConflict`] when another write landed
    /// first.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks with a due date before `today` whose status is neither
    /// done nor cancelled. Tasks already marked overdue are included.
    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks due between `today` and `today + window_days`, both
    /// inclusive, whose status is neither done nor cancelled.
    async fn find_due_soon(
        &self,
        window_days: u32,
        today: NaiveDate,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all tasks assigned to `user_id`.
    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored version moved on since the task was loaded.
    #[error("task {task_id} changed concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        /// Task identifier.
        task_id: TaskId,
        /// Version the writer expected to replace.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Returns the last date of a due-soon window, saturating at the calendar's
/// upper bound.
#[must_use]
pub fn due_soon_window_end(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_add_days(chrono::Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX)
}
