//! Lookup ports for users and categories.

use crate::directory::domain::{Category, CategoryId, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Resolves user references.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, id: UserId) -> DirectoryResult<Option<User>>;
}

/// Resolves category references.
#[async_trait]
pub trait CategoryDirectory: Send + Sync {
    /// Finds a category by identifier.
    ///
    /// Returns `None` when the category does not exist.
    async fn find_category(&self, id: CategoryId) -> DirectoryResult<Option<Category>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// Persistence-layer failure.
    #[error("directory lookup failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
