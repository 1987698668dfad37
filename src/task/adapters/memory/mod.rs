//! In-memory adapters for the task ports.

mod task;
mod user;

pub use task::InMemoryTaskRepository;
pub use user::InMemoryUserDirectory;
