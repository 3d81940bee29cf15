//! Task assignment join records with soft-delete history.

use super::{AssignmentId, TaskId};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Assignment of one user to one task.
///
/// Revoked assignments keep their record with a tombstone so assignment
/// history is preservable; "currently assigned" means an active record
/// exists. At most one active record may exist per (task, user) pair,
/// enforced by the repository's atomic insert-if-absent operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    id: AssignmentId,
    task_id: TaskId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted assignment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted assignment identifier.
    pub id: AssignmentId,
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted assignee identifier.
    pub user_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted tombstone timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TaskAssignment {
    /// Creates a new active assignment.
    #[must_use]
    pub fn new(task_id: TaskId, user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssignmentId::new(),
            task_id,
            user_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assignee identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
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

    /// Returns the tombstone timestamp, if the assignment was revoked.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the assignment has not been revoked.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Revokes the assignment by stamping its tombstone.
    ///
    /// Revoking an already-revoked assignment leaves it unchanged.
    pub fn revoke(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        if self.deleted_at.is_none() {
            self.deleted_at = Some(timestamp);
            self.updated_at = timestamp;
        }
    }
}
