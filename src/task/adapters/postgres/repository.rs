//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        CustomFields, LifecycleState, PersistedTaskData, Status, Task, TaskId, TaskTitle,
        TaskType, TaskVersion, UserId,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        expected_version: TaskVersion,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = to_changeset(task)?;
        let expected = to_db_version(expected_version)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::version.eq(expected)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated_count > 0 {
                return Ok(());
            }

            // Nothing matched: either the row is gone or its version moved on.
            let stored_version = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::version)
                .first::<i64>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;

            match stored_version {
                None => Err(TaskRepositoryError::NotFound(task_id)),
                Some(actual) => Err(TaskRepositoryError::VersionConflict {
                    task_id,
                    expected: expected_version,
                    actual: from_db_version(actual)?,
                }),
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_assignee(&self, assignee_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_id.eq(assignee_id.into_inner()))
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        task_type: task.task_type().as_str().to_owned(),
        status: to_db_status(task.status())?,
        lifecycle_state: task.lifecycle().as_str().to_owned(),
        assignee_id: task.assignee_id().into_inner(),
        custom_fields: task.custom_fields().clone().into_json(),
        version: to_db_version(task.version())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    Ok(TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: to_db_status(task.status())?,
        lifecycle_state: task.lifecycle().as_str().to_owned(),
        assignee_id: task.assignee_id().into_inner(),
        custom_fields: task.custom_fields().clone().into_json(),
        version: to_db_version(task.version())?,
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        task_type: persisted_type,
        status: persisted_status,
        lifecycle_state: persisted_lifecycle,
        assignee_id,
        custom_fields: persisted_fields,
        version: persisted_version,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let task_type =
        TaskType::try_from(persisted_type.as_str()).map_err(TaskRepositoryError::persistence)?;
    let raw_status = u32::try_from(persisted_status).map_err(TaskRepositoryError::persistence)?;
    let status = Status::new(raw_status).map_err(TaskRepositoryError::persistence)?;
    let lifecycle = LifecycleState::try_from(persisted_lifecycle.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let custom_fields = CustomFields::from_json(persisted_fields).ok_or_else(|| {
        TaskRepositoryError::persistence(std::io::Error::other(
            "custom_fields column does not hold a JSON object",
        ))
    })?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        task_type,
        status,
        lifecycle,
        assignee_id: UserId::from_uuid(assignee_id),
        custom_fields,
        version: from_db_version(persisted_version)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_db_status(status: Status) -> TaskRepositoryResult<i32> {
    i32::try_from(status.value()).map_err(TaskRepositoryError::persistence)
}

fn to_db_version(version: TaskVersion) -> TaskRepositoryResult<i64> {
    i64::try_from(version.value()).map_err(TaskRepositoryError::persistence)
}

fn from_db_version(version: i64) -> TaskRepositoryResult<TaskVersion> {
    u64::try_from(version)
        .map(TaskVersion::new)
        .map_err(TaskRepositoryError::persistence)
}
