//! Diesel row models for task persistence.

use super::schema::{projects, task_activity_log, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for project summaries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project display name.
    pub name: String,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Labels as a JSON text array.
    pub labels: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional blocked reason.
    pub blocked_reason: Option<String>,
    /// Optional estimate in hours.
    pub estimate_hours: Option<f64>,
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
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Labels as a JSON text array.
    pub labels: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional blocked reason.
    pub blocked_reason: Option<String>,
    /// Optional estimate in hours.
    pub estimate_hours: Option<f64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset writing every mutable task column, `NULL`s included.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Labels as a JSON text array.
    pub labels: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional blocked reason.
    pub blocked_reason: Option<String>,
    /// Optional estimate in hours.
    pub estimate_hours: Option<f64>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for activity entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_activity_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Event type.
    pub event_type: String,
    /// Optional structured payload.
    pub payload: Option<Value>,
    /// Event timestamp.
    pub occurred_at: DateTime<Utc>,
}

/// Insert model for activity entries. `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_activity_log)]
pub struct NewActivityRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Event type.
    pub event_type: String,
    /// Optional structured payload.
    pub payload: Option<Value>,
    /// Event timestamp.
    pub occurred_at: DateTime<Utc>,
}
