//! Request payloads accepted by the workflow service.

use crate::task::domain::{CustomFields, TaskId, TaskType, UserId};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) task_type: TaskType,
    pub(super) assignee_id: UserId,
    pub(super) custom_fields: Option<CustomFields>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, task_type: TaskType, assignee_id: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            task_type,
            assignee_id,
            custom_fields: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial custom fields.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: CustomFields) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    /// Returns the requested task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }
}

/// Request payload for moving a task one status forward or backward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) next_assignee_id: Option<UserId>,
    pub(super) custom_fields: Option<CustomFields>,
}

impl MoveTaskRequest {
    /// Creates a request that keeps the assignee and adds no fields.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            next_assignee_id: None,
            custom_fields: None,
        }
    }

    /// Hands the task to another user as part of the move.
    #[must_use]
    pub const fn with_next_assignee(mut self, assignee_id: UserId) -> Self {
        self.next_assignee_id = Some(assignee_id);
        self
    }

    /// Supplies fields required by the target status.
    ///
    /// Ignored on backward moves, which never alter stored fields.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: CustomFields) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Request payload for editing task metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) task_id: TaskId,
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) custom_fields: Option<CustomFields>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            custom_fields: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description; a blank string clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Merges fields into the stored ones, validated against the current
    /// status.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: CustomFields) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    /// Returns the task being edited.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}
