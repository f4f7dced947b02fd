//! `PostgreSQL` adapters for user and category lookups.

mod models;
mod repository;
mod schema;

pub use repository::{DirectoryPgPool, PostgresDirectory};
