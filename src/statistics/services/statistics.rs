//! Service layer exposing the three statistics queries.

use crate::directory::ports::{DirectoryError, UserDirectory};
use crate::error::ErrorKind;
use crate::statistics::domain::{PriorityDistribution, TaskStatistics, UserStatistics};
use crate::task::{
    domain::UserId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for statistics queries.
#[derive(Debug, Error)]
pub enum StatisticsError {
    /// No user exists with the given identifier.
    #[error("user {0} not found")]
    UserNotFound(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl StatisticsError {
    /// Classifies the error for the caller.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Directory(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for statistics queries.
pub type StatisticsResult<T> = Result<T, StatisticsError>;

/// Read-only reporting over the task store.
#[derive(Clone)]
pub struct StatisticsService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, D, C> StatisticsService<R, D, C>
where
    R: TaskRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new statistics service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Computes counts over every task.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn task_statistics(&self) -> StatisticsResult<TaskStatistics> {
        let tasks = self.repository.list_all().await?;
        Ok(TaskStatistics::from_tasks(&tasks, &*self.clock))
    }

    /// Computes completion metrics over the tasks assigned to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StatisticsError::UserNotFound`] when the user does not
    /// exist, or lookup errors.
    pub async fn user_statistics(&self, user_id: UserId) -> StatisticsResult<UserStatistics> {
        let user = self
            .directory
            .find_user(user_id)
            .await?
            .ok_or(StatisticsError::UserNotFound(user_id))?;
        let tasks = self.repository.find_by_assignee(user_id).await?;
        tracing::debug!(%user_id, tasks = tasks.len(), "computing user statistics");
        Ok(UserStatistics::from_tasks(user.name(), &tasks))
    }

    /// Counts open tasks per priority.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn priority_distribution(&self) -> StatisticsResult<PriorityDistribution> {
        let tasks = self.repository.list_all().await?;
        Ok(PriorityDistribution::from_tasks(&tasks))
    }
}
