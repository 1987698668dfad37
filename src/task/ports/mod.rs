//! Port contracts for the task workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod user_directory;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use user_directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
