//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Addressee user identifier.
    pub user_id: uuid::Uuid,
    /// Causing task event identifier.
    pub task_event_id: uuid::Uuid,
    /// Copied event message.
    pub message: String,
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Notification identifier.
    pub id: uuid::Uuid,
    /// Addressee user identifier.
    pub user_id: uuid::Uuid,
    /// Causing task event identifier.
    pub task_event_id: uuid::Uuid,
    /// Copied event message.
    pub message: String,
    /// Read timestamp.
    pub read_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
