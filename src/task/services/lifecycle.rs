//! Service layer for task creation, transitions, and field edits.

use crate::directory::ports::{CategoryDirectory, DirectoryError, UserDirectory};
use crate::error::ErrorKind;
use crate::notification::{NotificationError, NotificationSink};
use crate::task::{
    domain::{
        CategoryId, NewTask, Task, TaskDomainError, TaskFilter, TaskId, TaskPriority, TaskStatus,
        TaskTitle, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<NaiveDate>,
    estimated_hours: Option<u32>,
    assignee_id: Option<UserId>,
    category_id: Option<CategoryId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            estimated_hours: None,
            assignee_id: None,
            category_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority. Defaults to medium when unset.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the estimated effort in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// No user exists with the given identifier.
    #[error("user {0} not found")]
    UserNotFound(UserId),
    /// No category exists with the given identifier.
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),
    /// Domain validation or the transition table rejected the request.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User or category lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    /// The notification sink failed; the change has been undone.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl TaskLifecycleError {
    /// Classifies the error for the caller.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_)
            | Self::UserNotFound(_)
            | Self::CategoryNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Domain(err) if err.is_validation() => ErrorKind::ValidationFailed,
            Self::Domain(_) => ErrorKind::InvalidTransition,
            Self::Repository(TaskRepositoryError::VersionConflict { .. }) => ErrorKind::Conflict,
            Self::Repository(_) | Self::Directory(_) | Self::Notification(_) => {
                ErrorKind::Internal
            }
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Notifications are sent after the change has been persisted. A sink
/// failure undoes the change with a compensating write and is returned to
/// the caller as [`TaskLifecycleError::Notification`]; nothing is retried.
#[derive(Clone)]
pub struct TaskLifecycleService<R, D, N, C>
where
    R: TaskRepository,
    D: UserDirectory + CategoryDirectory,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<R, D, N, C> TaskLifecycleService<R, D, N, C>
where
    R: TaskRepository,
    D: UserDirectory + CategoryDirectory,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        notifier: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            directory,
            notifier,
            clock,
        }
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> TaskLifecycleResult<()> {
        UserDirectory::find_user(&*self.directory, user_id)
            .await?
            .map(|_| ())
            .ok_or(TaskLifecycleError::UserNotFound(user_id))
    }

    async fn ensure_category_exists(&self, category_id: CategoryId) -> TaskLifecycleResult<()> {
        CategoryDirectory::find_category(&*self.directory, category_id)
            .await?
            .map(|_| ())
            .ok_or(TaskLifecycleError::CategoryNotFound(category_id))
    }

    /// Creates a new task in the `Todo` status.
    ///
    /// The title and due date are validated before any reference is looked
    /// up. When the assignee notification fails the stored task is removed
    /// again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an empty title or a past
    /// due date, [`TaskLifecycleError::UserNotFound`] or
    /// [`TaskLifecycleError::CategoryNotFound`] for unresolved references,
    /// and repository or notification errors otherwise.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let mut new_task = NewTask::new(title).with_priority(request.priority.unwrap_or_default());
        if let Some(description) = request.description {
            new_task = new_task.with_description(description);
        }
        if let Some(due_date) = request.due_date {
            new_task = new_task.with_due_date(due_date);
        }
        if let Some(hours) = request.estimated_hours {
            new_task = new_task.with_estimated_hours(hours);
        }
        if let Some(assignee_id) = request.assignee_id {
            new_task = new_task.with_assignee(assignee_id);
        }
        if let Some(category_id) = request.category_id {
            new_task = new_task.with_category(category_id);
        }

        let task = Task::create(new_task, &*self.clock)?;
        if let Some(assignee_id) = task.assignee() {
            self.ensure_user_exists(assignee_id).await?;
        }
        if let Some(category_id) = task.category() {
            self.ensure_category_exists(category_id).await?;
        }

        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), title = %task.title(), "created task");

        if task.assignee().is_some()
            && let Err(err) = self.notifier.task_assigned(&task).await
        {
            let task_id = task.id();
            match self.repository.delete_by_id(task_id).await {
                Ok(()) => tracing::warn!(
                    %task_id,
                    error = %err,
                    "assignment notice failed, task removed"
                ),
                Err(undo_err) => tracing::error!(
                    %task_id,
                    error = %undo_err,
                    "failed to remove task after assignment notice failed"
                ),
            }
            return Err(err.into());
        }
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, or repository errors.
    pub async fn get_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.find_task_or_error(task_id).await
    }

    /// Lists tasks matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.list_all().await?;
        Ok(filter.apply(tasks))
    }

    /// Moves a task to `target` according to the transition table.
    ///
    /// Moving to `Done` stamps the completion time. The assignee is told of
    /// the change once it has been persisted; if that notice fails the
    /// previous state is written back.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] with
    /// [`TaskDomainError::InvalidStatusTransition`] when the table forbids
    /// the move, [`TaskRepositoryError::VersionConflict`] when a concurrent
    /// transition won, and [`TaskLifecycleError::Notification`] when the sink
    /// fails.
    pub async fn update_status(
        &self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let snapshot = task.clone();
        let old_status = task.transition_to(target, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(%task_id, from = %old_status, to = %target, "updated task status");

        if let Err(err) = self.notifier.status_changed(&task, old_status).await {
            return Err(self.undo_change(task, snapshot, err).await);
        }
        Ok(task)
    }

    /// Replaces a task's priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, or repository errors.
    pub async fn update_priority(
        &self,
        task_id: TaskId,
        priority: TaskPriority,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        let old_priority = task.set_priority(priority, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(%task_id, from = %old_priority, to = %priority, "updated task priority");
        Ok(task)
    }

    /// Assigns a task to `user_id`, replacing any previous assignee.
    ///
    /// The new assignee is notified first, then the previous assignee if
    /// there was one. If either notice fails the previous assignment is
    /// written back.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] or
    /// [`TaskLifecycleError::UserNotFound`] for unresolved identifiers, and
    /// repository or notification errors otherwise.
    pub async fn assign_task(&self, task_id: TaskId, user_id: UserId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        self.ensure_user_exists(user_id).await?;

        let snapshot = task.clone();
        let previous_assignee = task.assign(user_id, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(%task_id, assignee = %user_id, "assigned task");

        if let Err(err) = self.notify_reassignment(&task, previous_assignee).await {
            return Err(self.undo_change(task, snapshot, err).await);
        }
        Ok(task)
    }

    async fn notify_reassignment(
        &self,
        task: &Task,
        previous_assignee: Option<UserId>,
    ) -> Result<(), NotificationError> {
        self.notifier.task_assigned(task).await?;
        if let Some(previous) = previous_assignee {
            self.notifier.task_unassigned(task, previous).await?;
        }
        Ok(())
    }

    /// Writes `snapshot` back over the stored `changed` task after a failed
    /// notice and returns the notification error for the caller.
    async fn undo_change(
        &self,
        mut changed: Task,
        snapshot: Task,
        err: NotificationError,
    ) -> TaskLifecycleError {
        let task_id = changed.id();
        changed.revert_to(snapshot);
        match self.repository.update(&changed).await {
            Ok(()) => {
                tracing::warn!(%task_id, error = %err, "notification failed, change undone");
            }
            Err(undo_err) => tracing::error!(
                %task_id,
                error = %undo_err,
                "failed to undo change after notification failure"
            ),
        }
        err.into()
    }

    /// Deletes a task permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist, or repository errors.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.find_task_or_error(task_id).await?;
        self.repository.delete_by_id(task_id).await?;
        tracing::info!(%task_id, title = %task.title(), "deleted task");
        Ok(())
    }

    /// Lists tasks that are logically overdue as of today.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn overdue_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        Ok(self.repository.find_overdue(today).await?)
    }

    /// Lists open tasks due within `window_days` of today, inclusive.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn tasks_due_soon(&self, window_days: u32) -> TaskLifecycleResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        Ok(self.repository.find_due_soon(window_days, today).await?)
    }
}
