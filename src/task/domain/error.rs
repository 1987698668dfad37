//! Error types for task domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("task title exceeds {0} character limit")]
    TitleTooLong(usize),

    /// The status number is outside the one-based range.
    #[error("invalid status {0}, expected a positive integer")]
    InvalidStatus(u32),

    /// A mutation was attempted on a closed task.
    #[error("task {0} is closed and cannot be modified")]
    TaskClosed(TaskId),
}

/// Error returned while parsing task types from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);

/// Error returned while parsing lifecycle states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lifecycle state: {0}")]
pub struct ParseLifecycleStateError(pub String);
