//! Notification records addressed to task participants.

use super::NotificationId;
use crate::task::domain::{TaskEvent, TaskEventId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Unread-then-read notification addressed to one user.
///
/// Notifications are created only by fan-out, carry a verbatim copy of the
/// causing event's message, and are mutated only by the one-way read
/// marking. They are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    task_event_id: TaskEventId,
    message: String,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Persisted addressee identifier.
    pub user_id: UserId,
    /// Persisted causing event identifier.
    pub task_event_id: TaskEventId,
    /// Persisted message copy.
    pub message: String,
    /// Persisted read timestamp, if already read.
    pub read_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification for one participant of an event.
    #[must_use]
    pub fn for_event(event: &TaskEvent, user_id: UserId, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            task_event_id: event.id(),
            message: event.message().to_owned(),
            read_at: None,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            task_event_id: data.task_event_id,
            message: data.message,
            read_at: data.read_at,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the addressee identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the causing event identifier.
    #[must_use]
    pub const fn task_event_id(&self) -> TaskEventId {
        self.task_event_id
    }

    /// Returns the copied event message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the read timestamp, if the notification was read.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns `true` when the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification read at the given instant.
    ///
    /// Marking an already-read notification leaves it unchanged.
    pub fn mark_read(&mut self, read_at: DateTime<Utc>) {
        if self.read_at.is_none() {
            self.read_at = Some(read_at);
        }
    }
}
