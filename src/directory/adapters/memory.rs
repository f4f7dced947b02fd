//! In-memory user and category directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{Category, CategoryId, User, UserId},
    ports::{CategoryDirectory, DirectoryError, DirectoryResult, UserDirectory},
};

/// Thread-safe in-memory directory backing both lookup ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn put_user(&self, user: User) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.users.insert(user.id(), user);
        Ok(())
    }

    /// Inserts or replaces a category.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the lock is poisoned.
    pub fn put_category(&self, category: Category) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.categories.insert(category.id(), category);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>> {
        let state = self.state.read().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.users.get(&id).cloned())
    }
}

#[async_trait]
impl CategoryDirectory for InMemoryDirectory {
    async fn find_category(&self, id: CategoryId) -> DirectoryResult<Option<Category>> {
        let state = self.state.read().map_err(|err| {
            DirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.categories.get(&id).cloned())
    }
}
