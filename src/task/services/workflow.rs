//! Orchestration of task creation, status moves, edits, and closing.
//!
//! Each mutating operation is a read-modify-write: load the task, decide
//! the change with the status rule and the type's handler, then persist it
//! with an optimistic version check. Validation always runs before
//! persistence, so a rejected operation leaves the stored task untouched.

use super::{
    error::{TaskWorkflowError, TaskWorkflowResult},
    requests::{CreateTaskRequest, MoveTaskRequest, UpdateTaskRequest},
};
use crate::task::{
    domain::{
        CustomFields, Direction, DisplayState, NewTaskData, Status, Task, TaskEdit, TaskId,
        TaskTitle, User, UserId, workflow,
    },
    handlers::{TaskTypeHandler, TypeHandler},
    ports::{TaskRepository, UserDirectory},
    registry::TaskTypeRegistry,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A task together with its resolved assignee and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task itself.
    pub task: Task,
    /// Assignee, or `None` when the user no longer exists.
    pub assignee: Option<User>,
    /// Derived presentation label.
    pub display_state: DisplayState,
}

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    users: Arc<U>,
    registry: Arc<TaskTypeRegistry>,
    clock: Arc<C>,
}

impl<R, U, C> TaskWorkflowService<R, U, C>
where
    R: TaskRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(
        tasks: Arc<R>,
        users: Arc<U>,
        registry: Arc<TaskTypeRegistry>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            users,
            registry,
            clock,
        }
    }

    /// Returns the handler registry the service consults.
    #[must_use]
    pub fn registry(&self) -> &TaskTypeRegistry {
        &self.registry
    }

    /// Creates an open task at status 1 and returns it with its resolved
    /// assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::AssigneeNotFound`] for an unknown
    /// assignee, [`TaskWorkflowError::Registry`] for an unregistered type,
    /// [`TaskWorkflowError::ValidationFailed`] when optional fields are
    /// malformed, [`TaskWorkflowError::Domain`] for an empty title, or a
    /// repository error when persistence fails.
    #[instrument(skip_all, fields(task_type = %request.task_type()))]
    pub async fn create(&self, request: CreateTaskRequest) -> TaskWorkflowResult<TaskDetails> {
        self.create_inner(request)
            .await
            .inspect_err(|err| log_rejection("create", err))
    }

    async fn create_inner(&self, request: CreateTaskRequest) -> TaskWorkflowResult<TaskDetails> {
        let CreateTaskRequest {
            title,
            description,
            task_type,
            assignee_id,
            custom_fields,
        } = request;

        let assignee = self.resolve_user(assignee_id).await?;
        let validated_title = TaskTitle::new(title)?;
        let handler = self.registry.get(task_type)?;

        let provided = custom_fields.unwrap_or_default();
        handler
            .validate_requirements(Status::FIRST, &provided)
            .into_result()
            .map_err(TaskWorkflowError::ValidationFailed)?;
        let stored_fields = handler.transform_fields(Status::FIRST, &provided);

        let task = Task::new(
            NewTaskData {
                title: validated_title,
                description,
                task_type,
                assignee_id: assignee.id(),
                custom_fields: stored_fields,
            },
            &*self.clock,
        );
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), %task_type, assignee = %assignee.id(), "task created");
        let display_state =
            DisplayState::project(task.status(), task.lifecycle(), handler.max_status());
        Ok(TaskDetails {
            task,
            assignee: Some(assignee),
            display_state,
        })
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn get_task(&self, task_id: TaskId) -> TaskWorkflowResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Retrieves a task with its assignee and display state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`] when the task does not
    /// exist, or a lookup error from the ports.
    pub async fn get_task_details(&self, task_id: TaskId) -> TaskWorkflowResult<TaskDetails> {
        let task = self.load(task_id).await?;
        let assignee = self.users.find_by_id(task.assignee_id()).await?;
        let display_state = self.display_state(&task)?;
        Ok(TaskDetails {
            task,
            assignee,
            display_state,
        })
    }

    /// Lists every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn list_tasks(&self) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.find_all().await?)
    }

    /// Lists the tasks assigned to a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Repository`] when lookup fails.
    pub async fn list_tasks_for_user(&self, user_id: UserId) -> TaskWorkflowResult<Vec<Task>> {
        Ok(self.tasks.find_by_assignee(user_id).await?)
    }

    /// Lists every known user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::UserDirectory`] when lookup fails.
    pub async fn list_users(&self) -> TaskWorkflowResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::UserDirectory`] when lookup fails.
    pub async fn get_user(&self, user_id: UserId) -> TaskWorkflowResult<Option<User>> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Computes the display label of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::Registry`] when the task's type has no
    /// handler.
    pub fn display_state(&self, task: &Task) -> TaskWorkflowResult<DisplayState> {
        let handler = self.registry.get(task.task_type())?;
        Ok(DisplayState::project(
            task.status(),
            task.lifecycle(),
            handler.max_status(),
        ))
    }

    /// Moves a task one status forward.
    ///
    /// # Errors
    ///
    /// See [`Self::change_status`].
    pub async fn advance(&self, request: MoveTaskRequest) -> TaskWorkflowResult<Task> {
        self.change_status(Direction::Forward, request).await
    }

    /// Moves a task one status backward.
    ///
    /// # Errors
    ///
    /// See [`Self::change_status`].
    pub async fn reverse(&self, request: MoveTaskRequest) -> TaskWorkflowResult<Task> {
        self.change_status(Direction::Backward, request).await
    }

    /// Moves a task one status in `direction`.
    ///
    /// Provided fields are merged over the stored ones. Forward moves
    /// validate the merged set against the target status and store its
    /// normalized form. Backward moves skip validation and keep the stored
    /// fields exactly as they were; fields supplied with them are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::Immutable`] for closed tasks,
    /// [`TaskWorkflowError::InvalidTransition`] when the status rule refuses
    /// the move, [`TaskWorkflowError::ValidationFailed`] when a forward move
    /// lacks required fields, [`TaskWorkflowError::AssigneeNotFound`] for an
    /// unknown next assignee, or a repository error (including a version
    /// conflict) when persistence fails.
    #[instrument(skip_all, fields(task_id = %request.task_id(), direction = %direction))]
    pub async fn change_status(
        &self,
        direction: Direction,
        request: MoveTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        self.change_status_inner(direction, request)
            .await
            .inspect_err(|err| log_rejection("change_status", err))
    }

    async fn change_status_inner(
        &self,
        direction: Direction,
        request: MoveTaskRequest,
    ) -> TaskWorkflowResult<Task> {
        let MoveTaskRequest {
            task_id,
            next_assignee_id,
            custom_fields,
        } = request;

        let mut task = self.load(task_id).await?;
        ensure_open(&task)?;
        let handler = self.registry.get(task.task_type())?;
        let from_status = task.status();
        let next_status =
            workflow::transition(from_status, handler.max_status(), direction, task.lifecycle())?;
        debug!(from = %from_status, to = %next_status, "transition accepted");

        let provided = custom_fields.unwrap_or_default();
        let stored_fields = match direction {
            Direction::Forward => {
                forward_fields(handler, next_status, task.custom_fields(), &provided)?
            }
            Direction::Backward => {
                if !provided.is_empty() {
                    debug!(
                        ignored = provided.len(),
                        "fields supplied with backward move are ignored"
                    );
                }
                task.custom_fields().clone()
            }
        };

        let assignee_id = self.next_assignee(&task, next_assignee_id).await?;
        let expected_version = task.version();
        task.move_to(next_status, assignee_id, stored_fields, &*self.clock)?;
        self.tasks.update(&task, expected_version).await?;
        info!(
            %task_id,
            task_type = %task.task_type(),
            from = %from_status,
            to = %next_status,
            "task status changed"
        );
        Ok(task)
    }

    /// Closes a task at its final status, freezing it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::InvalidTransition`] when the task is already
    /// closed or not at its final status,
    /// [`TaskWorkflowError::FinalRequirementsUnmet`] when the stored fields
    /// no longer satisfy the final status, or a repository error.
    #[instrument(skip(self))]
    pub async fn close(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.close_inner(task_id)
            .await
            .inspect_err(|err| log_rejection("close", err))
    }

    async fn close_inner(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        let mut task = self.load(task_id).await?;
        let handler = self.registry.get(task.task_type())?;
        workflow::can_close(task.status(), handler.max_status(), task.lifecycle())?;

        handler
            .validate_requirements(task.status(), task.custom_fields())
            .into_result()
            .map_err(TaskWorkflowError::FinalRequirementsUnmet)?;

        let expected_version = task.version();
        task.close(&*self.clock)?;
        self.tasks.update(&task, expected_version).await?;
        info!(%task_id, task_type = %task.task_type(), "task closed");
        Ok(task)
    }

    /// Edits title, description, or custom fields without moving the task.
    ///
    /// Custom fields are merged over the stored ones and validated against
    /// the current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskWorkflowError::TaskNotFound`],
    /// [`TaskWorkflowError::Immutable`] for closed tasks,
    /// [`TaskWorkflowError::Domain`] for an empty title,
    /// [`TaskWorkflowError::ValidationFailed`] when merged fields do not
    /// satisfy the current status, or a repository error.
    #[instrument(skip_all, fields(task_id = %request.task_id()))]
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskWorkflowResult<Task> {
        self.update_inner(request)
            .await
            .inspect_err(|err| log_rejection("update", err))
    }

    async fn update_inner(&self, request: UpdateTaskRequest) -> TaskWorkflowResult<Task> {
        let UpdateTaskRequest {
            task_id,
            title,
            description,
            custom_fields,
        } = request;

        let mut task = self.load(task_id).await?;
        ensure_open(&task)?;

        let new_title = title.map(TaskTitle::new).transpose()?;
        let new_fields = match custom_fields {
            Some(provided) => {
                let handler = self.registry.get(task.task_type())?;
                let merged = task.custom_fields().merged_with(&provided);
                handler
                    .validate_requirements(task.status(), &merged)
                    .into_result()
                    .map_err(TaskWorkflowError::ValidationFailed)?;
                Some(handler.transform_fields(task.status(), &merged))
            }
            None => None,
        };

        let expected_version = task.version();
        task.apply_edit(
            TaskEdit {
                title: new_title,
                description,
                custom_fields: new_fields,
            },
            &*self.clock,
        )?;
        self.tasks.update(&task, expected_version).await?;
        info!(%task_id, "task updated");
        Ok(task)
    }

    async fn load(&self, task_id: TaskId) -> TaskWorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskWorkflowError::TaskNotFound(task_id))
    }

    async fn resolve_user(&self, user_id: UserId) -> TaskWorkflowResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(TaskWorkflowError::AssigneeNotFound(user_id))
    }

    /// Keeps the current assignee unless a different, existing user is named.
    async fn next_assignee(
        &self,
        task: &Task,
        requested: Option<UserId>,
    ) -> TaskWorkflowResult<UserId> {
        match requested {
            Some(user_id) if user_id != task.assignee_id() => {
                Ok(self.resolve_user(user_id).await?.id())
            }
            _ => Ok(task.assignee_id()),
        }
    }
}

/// Merges, validates, and normalizes fields for a forward move.
fn forward_fields(
    handler: &TypeHandler,
    next_status: Status,
    existing: &CustomFields,
    provided: &CustomFields,
) -> TaskWorkflowResult<CustomFields> {
    let merged = existing.merged_with(provided);
    handler
        .validate_requirements(next_status, &merged)
        .into_result()
        .map_err(TaskWorkflowError::ValidationFailed)?;
    Ok(handler.transform_fields(next_status, &merged))
}

fn ensure_open(task: &Task) -> TaskWorkflowResult<()> {
    if task.is_closed() {
        return Err(TaskWorkflowError::Immutable(task.id()));
    }
    Ok(())
}

fn log_rejection(operation: &'static str, err: &TaskWorkflowError) {
    warn!(operation, kind = err.kind().as_str(), error = %err, "workflow operation rejected");
}
