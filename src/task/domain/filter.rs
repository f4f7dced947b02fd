//! Predicate pipeline for narrowing task listings.

use super::{Task, TaskPriority, TaskStatus, UserId};

type TaskPredicate = Box<dyn Fn(&Task) -> bool + Send + Sync>;

/// Optional status, priority and assignee criteria.
///
/// Each criterion that is set becomes one predicate; predicates run in the
/// order status, priority, assignee and a task must pass all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    assignee: Option<UserId>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            priority: None,
            assignee: None,
        }
    }

    /// Keeps only tasks with the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps only tasks with the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps only tasks assigned to the given user.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    fn predicates(&self) -> Vec<TaskPredicate> {
        let mut predicates: Vec<TaskPredicate> = Vec::with_capacity(3);
        if let Some(status) = self.status {
            predicates.push(Box::new(move |task| task.status() == status));
        }
        if let Some(priority) = self.priority {
            predicates.push(Box::new(move |task| task.priority() == priority));
        }
        if let Some(assignee) = self.assignee {
            predicates.push(Box::new(move |task| task.assignee() == Some(assignee)));
        }
        predicates
    }

    /// Returns whether `task` passes every configured predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.predicates().iter().all(|predicate| predicate(task))
    }

    /// Runs the predicate pipeline over `tasks`, narrowing the collection
    /// one predicate at a time.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        self.predicates()
            .into_iter()
            .fold(tasks, |mut remaining, predicate| {
                remaining.retain(|task| predicate(task));
                remaining
            })
    }
}
