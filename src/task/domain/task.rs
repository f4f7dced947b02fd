//! Task aggregate root and its deadline-derived predicates.

use super::{CategoryId, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Value returned by [`Task::days_until_due`] for tasks without a due date.
///
/// Larger than the day span between any two dates `chrono` can represent,
/// so it never compares as "due soon".
pub const UNBOUNDED_DAYS_UNTIL_DUE: i64 = i32::MAX as i64;

/// Returns the current calendar date according to the clock.
fn today(clock: &impl Clock) -> NaiveDate {
    clock.utc().date_naive()
}

/// Parameter object for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    estimated_hours: Option<u32>,
    assignee: Option<UserId>,
    category: Option<CategoryId>,
}

impl NewTask {
    /// Creates task input with the required title and default priority.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
            due_date: None,
            estimated_hours: None,
            assignee: None,
            category: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
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

    /// Sets the assignee reference.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the category reference.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    completed_at: Option<DateTime<Utc>>,
    estimated_hours: Option<u32>,
    actual_hours: Option<u32>,
    assignee: Option<UserId>,
    category: Option<CategoryId>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Timestamp of the most recent completion, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Estimated effort in hours, if any.
    pub estimated_hours: Option<u32>,
    /// Actual effort in hours, if any.
    pub actual_hours: Option<u32>,
    /// Assignee reference, if any.
    pub assignee: Option<UserId>,
    /// Category reference, if any.
    pub category: Option<CategoryId>,
    /// Optimistic concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `Todo` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DueDateInPast`] when the due date is
    /// earlier than the clock's current date.
    pub fn create(new_task: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let current_date = today(clock);
        if let Some(due_date) = new_task.due_date
            && due_date < current_date
        {
            return Err(TaskDomainError::DueDateInPast {
                due_date,
                today: current_date,
            });
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: new_task.title,
            description: new_task.description,
            status: TaskStatus::Todo,
            priority: new_task.priority,
            due_date: new_task.due_date,
            completed_at: None,
            estimated_hours: new_task.estimated_hours,
            actual_hours: None,
            assignee: new_task.assignee,
            category: new_task.category,
            version: 1,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            completed_at: data.completed_at,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            assignee: data.assignee,
            category: data.category,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the stored lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the timestamp of the most recent completion.
    ///
    /// Reopening a task does not clear this value.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the estimated effort in hours.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<u32> {
        self.estimated_hours
    }

    /// Returns the actual effort in hours.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<u32> {
        self.actual_hours
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the category reference, if any.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Returns the optimistic concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the task is logically overdue: it has a due date
    /// before today and is neither done nor cancelled.
    ///
    /// A task already marked [`TaskStatus::Overdue`] still satisfies this.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        let current_date = today(clock);
        self.due_date.is_some_and(|due| due < current_date) && !self.status.is_terminal()
    }

    /// Returns the signed number of days from today until the due date.
    ///
    /// Negative once the due date has passed. Returns
    /// [`UNBOUNDED_DAYS_UNTIL_DUE`] when there is no due date.
    #[must_use]
    pub fn days_until_due(&self, clock: &impl Clock) -> i64 {
        self.due_date.map_or(UNBOUNDED_DAYS_UNTIL_DUE, |due| {
            due.signed_duration_since(today(clock)).num_days()
        })
    }

    /// Returns whether the task is urgent: urgent priority, or due no later
    /// than tomorrow.
    #[must_use]
    pub fn is_urgent(&self, clock: &impl Clock) -> bool {
        self.priority == TaskPriority::Urgent || self.days_until_due(clock) <= 1
    }

    /// Returns whether the transition table permits moving to `target`.
    #[must_use]
    pub fn can_transition_to(&self, target: TaskStatus) -> bool {
        self.status.can_transition_to(target)
    }

    /// Sets the status to `Done` and stamps the completion time.
    ///
    /// Transition legality is not checked here; use
    /// [`Task::transition_to`] for guarded moves.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Done;
        self.completed_at = Some(clock.utc());
        self.touch(clock);
    }

    /// Moves the task to `target` if the transition table permits it and
    /// returns the previous status.
    ///
    /// Moving to `Done` also stamps the completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the move is
    /// not in the table. The task is left unchanged.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<TaskStatus, TaskDomainError> {
        let previous = self.status;
        if !previous.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: previous,
                to: target,
            });
        }

        self.status = target;
        if target == TaskStatus::Done {
            self.complete(clock);
        } else {
            self.touch(clock);
        }
        Ok(previous)
    }

    /// Marks the task overdue without consulting the transition table.
    ///
    /// Only the overdue sweep calls this.
    pub fn mark_overdue(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Overdue;
        self.touch(clock);
    }

    /// Replaces the priority and returns the previous one.
    pub fn set_priority(&mut self, priority: TaskPriority, clock: &impl Clock) -> TaskPriority {
        let previous = self.priority;
        self.priority = priority;
        self.touch(clock);
        previous
    }

    /// Replaces the assignee and returns the previous one, if any.
    pub fn assign(&mut self, assignee: UserId, clock: &impl Clock) -> Option<UserId> {
        let previous = self.assignee.replace(assignee);
        self.touch(clock);
        previous
    }

    /// Restores every field from `snapshot` and advances the version past
    /// the current one.
    ///
    /// Used to undo a change that has already been stored: the result is a
    /// regular next-version write whose content matches the snapshot.
    pub fn revert_to(&mut self, snapshot: Self) {
        let version = self.version.saturating_add(1);
        *self = Self { version, ..snapshot };
    }

    /// Bumps the modification timestamp and the concurrency version.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}
