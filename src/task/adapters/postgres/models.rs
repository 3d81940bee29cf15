//! Diesel row models for task persistence.

use super::schema::{task_assignments, task_events, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Collaborative status.
    pub status: String,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Tombstone timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Collaborative status.
    pub status: String,
    /// Owning user identifier.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Tombstone timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Query result row for assignment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Assigned task identifier.
    pub task_id: uuid::Uuid,
    /// Assignee user identifier.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Tombstone timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for assignment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_assignments)]
pub struct NewAssignmentRow {
    /// Assignment identifier.
    pub id: uuid::Uuid,
    /// Assigned task identifier.
    pub task_id: uuid::Uuid,
    /// Assignee user identifier.
    pub user_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Tombstone timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Query result row for task event records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user identifier.
    pub actor_id: uuid::Uuid,
    /// Event kind discriminant.
    pub event_type: String,
    /// Structured event payload.
    pub payload: Value,
    /// Precomputed human-readable message.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_events)]
pub struct NewTaskEventRow {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Task the event belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user identifier.
    pub actor_id: uuid::Uuid,
    /// Event kind discriminant.
    pub event_type: String,
    /// Structured event payload.
    pub payload: Value,
    /// Precomputed human-readable message.
    pub message: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
