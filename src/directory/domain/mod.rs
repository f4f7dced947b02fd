//! Domain model for the user and category directory.

mod category;
mod error;
mod ids;
mod user;

pub use category::{Category, CategoryName};
pub use error::DirectoryDomainError;
pub use ids::{CategoryId, UserId};
pub use user::{EmailAddress, User};
