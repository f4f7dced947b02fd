//! Notification sink port.

use crate::task::domain::{Task, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification delivery.
pub type NotificationResult = Result<(), NotificationError>;

/// Receiver for task lifecycle notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// A task was assigned to its current assignee.
    async fn task_assigned(&self, task: &Task) -> NotificationResult;

    /// A task moved from `old_status` to its current status.
    async fn status_changed(&self, task: &Task, old_status: TaskStatus) -> NotificationResult;

    /// A task was taken away from `previous_assignee`.
    async fn task_unassigned(&self, task: &Task, previous_assignee: UserId) -> NotificationResult;

    /// A task's due date falls inside the reminder window.
    async fn upcoming_deadline(&self, task: &Task) -> NotificationResult;

    /// A task was marked overdue.
    async fn overdue_task(&self, task: &Task) -> NotificationResult;
}

/// Errors raised by notification sinks.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The notification could not be delivered.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
