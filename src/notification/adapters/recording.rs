//! In-memory sink that records every notification in call order.

use crate::notification::{NotificationError, NotificationResult, NotificationSink};
use crate::task::domain::{Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// `task_assigned` was called.
    Assigned {
        /// Task identifier.
        task_id: TaskId,
        /// Assignee at the time of the call.
        assignee: Option<UserId>,
    },
    /// `status_changed` was called.
    StatusChanged {
        /// Task identifier.
        task_id: TaskId,
        /// Status before the transition.
        from: TaskStatus,
        /// Status after the transition.
        to: TaskStatus,
    },
    /// `task_unassigned` was called.
    Unassigned {
        /// Task identifier.
        task_id: TaskId,
        /// Assignee that lost the task.
        previous_assignee: UserId,
    },
    /// `upcoming_deadline` was called.
    UpcomingDeadline {
        /// Task identifier.
        task_id: TaskId,
    },
    /// `overdue_task` was called.
    Overdue {
        /// Task identifier.
        task_id: TaskId,
    },
}

/// Thread-safe recording sink that can be switched into a failing mode.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    recorded: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotificationSink {
    /// Creates a sink with no recorded notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (`true`) or succeed (`false`).
    /// Failed calls are not recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a snapshot of the recorded notifications.
    #[must_use]
    pub fn recorded(&self) -> Vec<Notification> {
        self.recorded
            .lock()
            .map(|recorded| recorded.clone())
            .unwrap_or_default()
    }

    fn record(&self, notification: Notification) -> NotificationResult {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::delivery(std::io::Error::other(
                "recording sink is in failing mode",
            )));
        }
        let mut recorded = self.recorded.lock().map_err(|err| {
            NotificationError::delivery(std::io::Error::other(err.to_string()))
        })?;
        recorded.push(notification);
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn task_assigned(&self, task: &Task) -> NotificationResult {
        self.record(Notification::Assigned {
            task_id: task.id(),
            assignee: task.assignee(),
        })
    }

    async fn status_changed(&self, task: &Task, old_status: TaskStatus) -> NotificationResult {
        self.record(Notification::StatusChanged {
            task_id: task.id(),
            from: old_status,
            to: task.status(),
        })
    }

    async fn task_unassigned(&self, task: &Task, previous_assignee: UserId) -> NotificationResult {
        self.record(Notification::Unassigned {
            task_id: task.id(),
            previous_assignee,
        })
    }

    async fn upcoming_deadline(&self, task: &Task) -> NotificationResult {
        self.record(Notification::UpcomingDeadline { task_id: task.id() })
    }

    async fn overdue_task(&self, task: &Task) -> NotificationResult {
        self.record(Notification::Overdue { task_id: task.id() })
    }
}
