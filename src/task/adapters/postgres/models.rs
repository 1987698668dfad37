//! Diesel row models for task and user persistence.

use super::schema::{tasks, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type tag.
    pub task_type: String,
    /// Workflow status.
    pub status: i32,
    /// Lifecycle state.
    pub lifecycle_state: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Custom field payload.
    pub custom_fields: Value,
    /// Optimistic concurrency revision.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Task type tag.
    pub task_type: String,
    /// Workflow status.
    pub status: i32,
    /// Lifecycle state.
    pub lifecycle_state: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Custom field payload.
    pub custom_fields: Value,
    /// Optimistic concurrency revision.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for mutable task columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: i32,
    /// Lifecycle state.
    pub lifecycle_state: String,
    /// Assigned user.
    pub assignee_id: uuid::Uuid,
    /// Custom field payload.
    pub custom_fields: Value,
    /// Optimistic concurrency revision.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for users.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
}
