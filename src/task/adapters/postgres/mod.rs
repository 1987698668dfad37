//! `PostgreSQL` adapters for task workflow persistence.

mod models;
mod repository;
mod schema;
mod user_directory;

pub use repository::{PostgresTaskRepository, TaskPgPool};
pub use user_directory::PostgresUserDirectory;
