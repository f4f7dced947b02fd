//! Port contracts for resolving user and category references.

pub mod directory;

pub use directory::{CategoryDirectory, DirectoryError, DirectoryResult, UserDirectory};
