//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, UserId},
    ports::{
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        repository::due_soon_window_end,
    },
};

/// Thread-safe in-memory task repository.
///
/// Listings are returned in creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskState {
    fn select(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| predicate(task))
            .cloned()
            .collect()
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state<T>(&self, f: impl FnOnce(&InMemoryTaskState) -> T) -> TaskRepositoryResult<T> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&state))
    }

    fn write_state<T>(
        &self,
        f: impl FnOnce(&mut InMemoryTaskState) -> TaskRepositoryResult<T>,
    ) -> TaskRepositoryResult<T> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        f(&mut state)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.write_state(|state| {
            if state.tasks.contains_key(&task.id()) {
                return Err(TaskRepositoryError::DuplicateTask(task.id()));
            }
            state.insertion_order.push(task.id());
            state.tasks.insert(task.id(), task.clone());
            Ok(())
        })
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.write_state(|state| {
            let stored = state
                .tasks
                .get_mut(&task.id())
                .ok_or(TaskRepositoryError::NotFound(task.id()))?;

            let expected = task.version().saturating_sub(1);
            if stored.version() != expected {
                return Err(TaskRepositoryError::VersionConflict {
                    task_id: task.id(),
                    expected,
                    found: stored.version(),
                });
            }

            *stored = task.clone();
            Ok(())
        })
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.read_state(|state| state.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.read_state(|state| state.select(|_| true))
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.read_state(|state| {
            state.select(|task| {
                !task.status().is_terminal() && task.due_date().is_some_and(|due| due < today)
            })
        })
    }

    async fn find_due_soon(
        &self,
        window_days: u32,
        today: NaiveDate,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let window_end = due_soon_window_end(today, window_days);
        self.read_state(|state| {
            state.select(|task| {
                !task.status().is_terminal()
                    && task
                        .due_date()
                        .is_some_and(|due| due >= today && due <= window_end)
            })
        })
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.read_state(|state| state.select(|task| task.assignee() == Some(user_id)))
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.write_state(|state| {
            state
                .tasks
                .remove(&id)
                .ok_or(TaskRepositoryError::NotFound(id))?;
            state.insertion_order.retain(|existing| *existing != id);
            Ok(())
        })
    }
}
