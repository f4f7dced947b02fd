//! Domain model for the task lifecycle.
//!
//! A [`Task`] owns its transition legality and its deadline-derived
//! predicates. Two notions of "overdue" coexist on purpose:
//!
//! - [`Task::is_overdue`] is *logically overdue*: computed from the due date
//!   and the clock on every call.
//! - [`TaskStatus::Overdue`] is *marked overdue*: a stored status written by
//!   the overdue sweep.
//!
//! A task past its due date is logically overdue before any sweep has run,
//! and a task marked overdue still satisfies the predicate. The two are kept
//! consistent by the sweep, not by the type system.

mod error;
mod filter;
mod ids;
mod status;
mod task;

pub use crate::directory::domain::{CategoryId, UserId};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::{TaskId, TaskTitle};
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, UNBOUNDED_DAYS_UNTIL_DUE};
