//! Error types for directory value validation.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The user display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,
}
