//! Task aggregate root and related lifecycle types.

use super::{
    CustomFields, ParseLifecycleStateError, Status, TaskDomainError, TaskId, TaskTitle, TaskType,
    TaskVersion, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a task can still change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// The task accepts status moves and edits.
    Open,
    /// Terminal state; the task is frozen.
    Closed,
}

impl LifecycleState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LifecycleState {
    type Error = ParseLifecycleStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseLifecycleStateError(value.to_owned())),
        }
    }
}

/// Presentation label derived from status and lifecycle state.
///
/// Never stored; always recomputed with [`DisplayState::project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// First status, nothing submitted yet.
    Draft,
    /// Second status.
    InProgress,
    /// Any intermediate status past the second.
    Review,
    /// Final status reached; the task may be closed.
    Completed,
    /// Task has been closed.
    Closed,
}

impl DisplayState {
    /// Maps authoritative task state onto a display label.
    ///
    /// Closed wins over everything, then the final status, then the
    /// positional labels for statuses 1 and 2.
    #[must_use]
    pub fn project(status: Status, lifecycle: LifecycleState, max_status: Status) -> Self {
        if lifecycle == LifecycleState::Closed {
            return Self::Closed;
        }
        if status == max_status {
            return Self::Completed;
        }
        match status.value() {
            1 => Self::Draft,
            2 => Self::InProgress,
            _ => Self::Review,
        }
    }

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Closed => "closed",
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    task_type: TaskType,
    status: Status,
    lifecycle: LifecycleState,
    assignee_id: UserId,
    custom_fields: CustomFields,
    version: TaskVersion,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a brand-new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Task type governing the workflow.
    pub task_type: TaskType,
    /// Resolved assignee.
    pub assignee_id: UserId,
    /// Fields already normalized for status 1.
    pub custom_fields: CustomFields,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted task type.
    pub task_type: TaskType,
    /// Persisted workflow status.
    pub status: Status,
    /// Persisted lifecycle state.
    pub lifecycle: LifecycleState,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted custom fields.
    pub custom_fields: CustomFields,
    /// Persisted revision.
    pub version: TaskVersion,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Metadata changes applied by a task edit.
///
/// `None` leaves the corresponding attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description; a blank string clears it.
    pub description: Option<String>,
    /// Replacement custom fields, already validated and normalized.
    pub custom_fields: Option<CustomFields>,
}

impl Task {
    /// Creates an open task at status 1.
    #[must_use]
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: normalize_description(data.description),
            task_type: data.task_type,
            status: Status::FIRST,
            lifecycle: LifecycleState::Open,
            assignee_id: data.assignee_id,
            custom_fields: data.custom_fields,
            version: TaskVersion::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            task_type: data.task_type,
            status: data.status,
            lifecycle: data.lifecycle,
            assignee_id: data.assignee_id,
            custom_fields: data.custom_fields,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the current workflow status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    /// Returns whether the task has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lifecycle == LifecycleState::Closed
    }

    /// Returns the assignee identifier.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the custom fields, including those kept from earlier statuses.
    #[must_use]
    pub const fn custom_fields(&self) -> &CustomFields {
        &self.custom_fields
    }

    /// Returns the revision used for optimistic concurrency.
    #[must_use]
    pub const fn version(&self) -> TaskVersion {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `status`, reopening it and recording the assignee
    /// and fields that accompany the move.
    ///
    /// The caller is responsible for having checked the move against the
    /// status transition rule and the type's requirements.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] if the task is closed.
    pub fn move_to(
        &mut self,
        status: Status,
        assignee_id: UserId,
        custom_fields: CustomFields,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.status = status;
        self.lifecycle = LifecycleState::Open;
        self.assignee_id = assignee_id;
        self.custom_fields = custom_fields;
        self.touch(clock);
        Ok(())
    }

    /// Applies a metadata edit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] if the task is closed.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        let TaskEdit {
            title,
            description,
            custom_fields,
        } = edit;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if description.is_some() {
            self.description = normalize_description(description);
        }
        if let Some(fields) = custom_fields {
            self.custom_fields = fields;
        }
        self.touch(clock);
        Ok(())
    }

    /// Closes the task, freezing it permanently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskClosed`] if the task is already closed.
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_open()?;
        self.lifecycle = LifecycleState::Closed;
        self.touch(clock);
        Ok(())
    }

    const fn ensure_open(&self) -> Result<(), TaskDomainError> {
        match self.lifecycle {
            LifecycleState::Open => Ok(()),
            LifecycleState::Closed => Err(TaskDomainError::TaskClosed(self.id)),
        }
    }

    /// Advances the revision and the `updated_at` timestamp.
    fn touch(&mut self, clock: &impl Clock) {
        self.version = self.version.next();
        self.updated_at = clock.utc();
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
