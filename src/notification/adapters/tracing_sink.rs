//! Sink that delivers notifications as structured log events.

use crate::directory::{domain::User, ports::UserDirectory};
use crate::notification::{NotificationError, NotificationResult, NotificationSink};
use crate::task::domain::{Task, TaskStatus, UserId};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// Severity used for a delivered notification.
#[derive(Debug, Clone, Copy)]
enum Severity {
    Info,
    Warn,
    Error,
}

/// Delivers notifications to the recipient's address by emitting `tracing`
/// events.
///
/// Recipients are resolved through the [`UserDirectory`]. Tasks without an
/// assignee and recipients that are missing or inactive are skipped.
pub struct TracingNotificationSink<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> TracingNotificationSink<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a sink resolving recipients through `directory`.
    #[must_use]
    pub const fn new(directory: Arc<D>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    async fn recipient(&self, user_id: Option<UserId>) -> Result<Option<User>, NotificationError> {
        let Some(id) = user_id else {
            return Ok(None);
        };
        let user = self
            .directory
            .find_user(id)
            .await
            .map_err(NotificationError::delivery)?;
        Ok(user.filter(User::is_active))
    }

    async fn deliver_to_assignee(
        &self,
        task: &Task,
        severity: Severity,
        message: impl FnOnce() -> String + Send,
    ) -> NotificationResult {
        if let Some(user) = self.recipient(task.assignee()).await? {
            emit(&user, task, severity, &message());
        }
        Ok(())
    }
}

fn emit(recipient: &User, task: &Task, severity: Severity, message: &str) {
    let email = recipient.email().as_str();
    let task_id = task.id();
    match severity {
        Severity::Info => tracing::info!(%task_id, recipient = email, "{message}"),
        Severity::Warn => tracing::warn!(%task_id, recipient = email, "{message}"),
        Severity::Error => tracing::error!(%task_id, recipient = email, "{message}"),
    }
}

#[async_trait]
impl<D, C> NotificationSink for TracingNotificationSink<D, C>
where
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    async fn task_assigned(&self, task: &Task) -> NotificationResult {
        self.deliver_to_assignee(task, Severity::Info, || {
            let due = task
                .due_date()
                .map_or_else(|| "No deadline".to_owned(), |date| date.to_string());
            format!(
                "New task assigned to you: '{}' (Priority: {}, Due: {due})",
                task.title(),
                task.priority()
            )
        })
        .await
    }

    async fn status_changed(&self, task: &Task, old_status: TaskStatus) -> NotificationResult {
        self.deliver_to_assignee(task, Severity::Info, || {
            format!(
                "Task '{}' status changed: {old_status} -> {}",
                task.title(),
                task.status()
            )
        })
        .await
    }

    async fn task_unassigned(&self, task: &Task, previous_assignee: UserId) -> NotificationResult {
        let Some(previous) = self.recipient(Some(previous_assignee)).await? else {
            return Ok(());
        };
        let new_assignee = match task.assignee() {
            Some(id) => self
                .directory
                .find_user(id)
                .await
                .map_err(NotificationError::delivery)?
                .map(|user| user.name().to_owned()),
            None => None,
        };
        let message = new_assignee.map_or_else(
            || format!("Task '{}' has been unassigned from you", task.title()),
            |name| format!("Task '{}' has been reassigned to {name}", task.title()),
        );
        emit(&previous, task, Severity::Info, &message);
        Ok(())
    }

    async fn upcoming_deadline(&self, task: &Task) -> NotificationResult {
        let days_left = task.days_until_due(&*self.clock);
        self.deliver_to_assignee(task, Severity::Warn, || {
            format!(
                "Reminder: Task '{}' is due in {days_left} day(s)",
                task.title()
            )
        })
        .await
    }

    async fn overdue_task(&self, task: &Task) -> NotificationResult {
        self.deliver_to_assignee(task, Severity::Error, || {
            let due = task
                .due_date()
                .map_or_else(|| "none".to_owned(), |date| date.to_string());
            format!("Task '{}' is overdue! (Due date was: {due})", task.title())
        })
        .await
    }
}
