//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{models::TaskRow, schema::tasks};
use crate::task::{
    domain::{
        CategoryId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle, UserId,
    },
    ports::{
        TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        repository::due_soon_window_end,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

fn terminal_statuses() -> Vec<&'static str> {
    vec![TaskStatus::Done.as_str(), TaskStatus::Cancelled.as_str()]
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    async fn load_where<F>(&self, build: F) -> TaskRepositoryResult<Vec<Task>>
    where
        F: FnOnce() -> tasks::BoxedQuery<'static, diesel::pg::Pg> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            let rows = build()
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let expected = task.version().saturating_sub(1);
        let expected_column = i64::try_from(expected).map_err(TaskRepositoryError::persistence)?;
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::version.eq(expected_column)),
            )
            .set(&row)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            let stored_version = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::version)
                .first::<i64>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            match stored_version {
                None => Err(TaskRepositoryError::NotFound(task_id)),
                Some(found) => Err(TaskRepositoryError::VersionConflict {
                    task_id,
                    expected,
                    found: u64::try_from(found).map_err(TaskRepositoryError::persistence)?,
                }),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(|| tasks::table.into_boxed()).await
    }

    async fn find_overdue(&self, today: NaiveDate) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(move || {
            tasks::table
                .filter(tasks::due_date.lt(today))
                .filter(tasks::status.ne_all(terminal_statuses()))
                .into_boxed()
        })
        .await
    }

    async fn find_due_soon(
        &self,
        window_days: u32,
        today: NaiveDate,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let window_end = due_soon_window_end(today, window_days);
        self.load_where(move || {
            tasks::table
                .filter(tasks::due_date.ge(today))
                .filter(tasks::due_date.le(window_end))
                .filter(tasks::status.ne_all(terminal_statuses()))
                .into_boxed()
        })
        .await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.load_where(move || {
            tasks::table
                .filter(tasks::assignee_id.eq(user_id.into_inner()))
                .into_boxed()
        })
        .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn hours_to_column(hours: Option<u32>) -> TaskRepositoryResult<Option<i32>> {
    hours
        .map(|value| i32::try_from(value).map_err(TaskRepositoryError::persistence))
        .transpose()
}

fn hours_from_column(hours: Option<i32>) -> TaskRepositoryResult<Option<u32>> {
    hours
        .map(|value| u32::try_from(value).map_err(TaskRepositoryError::persistence))
        .transpose()
}

fn to_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    Ok(TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        estimated_hours: hours_to_column(task.estimated_hours())?,
        actual_hours: hours_to_column(task.actual_hours())?,
        assignee_id: task.assignee().map(UserId::into_inner),
        category_id: task.category().map(CategoryId::into_inner),
        version: i64::try_from(task.version()).map_err(TaskRepositoryError::persistence)?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        priority: persisted_priority,
        due_date,
        completed_at,
        estimated_hours,
        actual_hours,
        assignee_id,
        category_id,
        version,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?,
        description,
        status: TaskStatus::try_from(persisted_status.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(persisted_priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        due_date,
        completed_at,
        estimated_hours: hours_from_column(estimated_hours)?,
        actual_hours: hours_from_column(actual_hours)?,
        assignee: assignee_id.map(UserId::from_uuid),
        category: category_id.map(CategoryId::from_uuid),
        version: u64::try_from(version).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
