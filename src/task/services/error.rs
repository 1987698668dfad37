//! Service-level errors for workflow operations.

use crate::task::{
    domain::{TaskDomainError, TaskId, TransitionRejection, UserId, ValidationReport},
    ports::{TaskRepositoryError, UserDirectoryError},
    registry::RegistryError,
};
use thiserror::Error;

/// Machine-checkable category of a [`TaskWorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The task does not exist.
    NotFound,
    /// Field or input validation failed.
    ValidationFailed,
    /// The task is closed.
    Immutable,
    /// The status is outside the task type's workflow.
    UnsupportedStatus,
    /// The referenced user does not exist.
    AssigneeNotFound,
    /// The status rule refused the move or close.
    InvalidTransition,
    /// No handler exists for the task type.
    UnregisteredType,
    /// The handler registry was assembled incorrectly.
    Configuration,
    /// The task changed concurrently or a stored key collided.
    Conflict,
    /// Storage failed.
    Persistence,
}

impl ErrorKind {
    /// Returns the stable identifier of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::ValidationFailed => "validation-failed",
            Self::Immutable => "immutable",
            Self::UnsupportedStatus => "unsupported-status",
            Self::AssigneeNotFound => "assignee-not-found",
            Self::InvalidTransition => "invalid-transition",
            Self::UnregisteredType => "unregistered-type",
            Self::Configuration => "configuration",
            Self::Conflict => "conflict",
            Self::Persistence => "persistence",
        }
    }
}

/// Errors returned by [`super::TaskWorkflowService`].
#[derive(Debug, Error)]
pub enum TaskWorkflowError {
    /// No task has the identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The assignee could not be resolved.
    #[error("user not found: {0}")]
    AssigneeNotFound(UserId),

    /// Custom fields do not satisfy the target status.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationReport),

    /// The task is closed and frozen.
    #[error("task {0} is closed and cannot be modified")]
    Immutable(TaskId),

    /// The status transition rule refused the operation.
    #[error(transparent)]
    InvalidTransition(TransitionRejection),

    /// The final status requirements no longer hold at close time.
    #[error("cannot close task: final status requirements not satisfied ({0})")]
    FinalRequirementsUnmet(ValidationReport),

    /// Handler lookup failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Domain value construction failed.
    #[error(transparent)]
    Domain(TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// User directory operation failed.
    #[error(transparent)]
    UserDirectory(#[from] UserDirectoryError),
}

impl TaskWorkflowError {
    /// Returns the error's category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::AssigneeNotFound(_) => ErrorKind::AssigneeNotFound,
            Self::ValidationFailed(report) if report.has_unsupported_status() => {
                ErrorKind::UnsupportedStatus
            }
            Self::ValidationFailed(_)
            | Self::FinalRequirementsUnmet(_)
            | Self::Domain(
                TaskDomainError::EmptyTitle
                | TaskDomainError::TitleTooLong(_)
                | TaskDomainError::InvalidStatus(_),
            ) => ErrorKind::ValidationFailed,
            Self::Immutable(_)
            | Self::Domain(TaskDomainError::TaskClosed(_))
            | Self::InvalidTransition(
                TransitionRejection::ClosedImmutable | TransitionRejection::AlreadyClosed,
            ) => ErrorKind::Immutable,
            Self::InvalidTransition(_) => ErrorKind::InvalidTransition,
            Self::Registry(RegistryError::UnregisteredType(_)) => ErrorKind::UnregisteredType,
            Self::Registry(RegistryError::DuplicateType(_)) => ErrorKind::Configuration,
            Self::Repository(
                TaskRepositoryError::VersionConflict { .. } | TaskRepositoryError::DuplicateTask(_),
            )
            | Self::UserDirectory(
                UserDirectoryError::DuplicateUser(_) | UserDirectoryError::DuplicateEmail(_),
            ) => ErrorKind::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_))
            | Self::UserDirectory(UserDirectoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }

    /// Returns the human-readable messages for the failure.
    ///
    /// Validation failures yield one message per field issue; every other
    /// error yields its display string.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed(report) | Self::FinalRequirementsUnmet(report) => {
                report.messages()
            }
            _ => vec![self.to_string()],
        }
    }
}

impl From<TaskDomainError> for TaskWorkflowError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::TaskClosed(task_id) => Self::Immutable(task_id),
            other => Self::Domain(other),
        }
    }
}

impl From<TransitionRejection> for TaskWorkflowError {
    fn from(rejection: TransitionRejection) -> Self {
        Self::InvalidTransition(rejection)
    }
}

/// Result type for workflow service operations.
pub type TaskWorkflowResult<T> = Result<T, TaskWorkflowError>;
