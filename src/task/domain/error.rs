//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A new task was given a due date earlier than today.
    #[error("due date {due_date} is in the past (today is {today})")]
    DueDateInPast {
        /// Requested due date.
        due_date: NaiveDate,
        /// Current calendar date according to the clock.
        today: NaiveDate,
    },

    /// The transition table forbids moving between the two statuses.
    #[error("cannot transition task {task_id} from {from} to {to}")]
    InvalidStatusTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },
}

impl TaskDomainError {
    /// Returns whether the error describes malformed input rather than a
    /// business-rule violation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyTitle | Self::DueDateInPast { .. })
    }
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
