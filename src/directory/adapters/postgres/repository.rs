//! `PostgreSQL` directory implementation.

use super::{
    models::{CategoryRow, UserRow},
    schema::{categories, users},
};
use crate::directory::{
    domain::{Category, CategoryId, CategoryName, EmailAddress, User, UserId},
    ports::{CategoryDirectory, DirectoryError, DirectoryResult, UserDirectory},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user and category directory.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: DirectoryPgPool,
}

impl PostgresDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresDirectory {
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }
}

#[async_trait]
impl CategoryDirectory for PostgresDirectory {
    async fn find_category(&self, id: CategoryId) -> DirectoryResult<Option<Category>> {
        self.run_blocking(move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_category).transpose()
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> DirectoryResult<User> {
    let UserRow {
        id,
        email,
        name,
        active,
        created_at,
    } = row;
    let address = EmailAddress::new(email).map_err(DirectoryError::persistence)?;
    Ok(User::from_persisted(
        UserId::from_uuid(id),
        name,
        address,
        active,
        created_at,
    ))
}

fn row_to_category(row: CategoryRow) -> DirectoryResult<Category> {
    let name = CategoryName::new(row.name).map_err(DirectoryError::persistence)?;
    Ok(Category::from_persisted(CategoryId::from_uuid(row.id), name))
}
