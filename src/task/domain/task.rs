//! Task aggregate root and partial-update changes.

use super::{StatusTransition, TaskDomainError, TaskId, TaskStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Widest title and description accepted by the persisted schema.
const TEXT_FIELD_LIMIT: usize = 255;

/// Task aggregate root.
///
/// The owner is set at creation and never reassigned; the owner is always a
/// participant regardless of assignment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Partial update applied through either task update channel.
///
/// Only supplied fields are written; omitted fields keep their current
/// values. Supplying the current status is a recorded no-op and produces no
/// transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title: None,
            description: None,
            due_date: None,
            status: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the requested status, if one was supplied.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted owner identifier.
    pub owner_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted tombstone timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending task owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when the title is empty or either text
    /// field exceeds the schema-backed maximum.
    pub fn new(
        owner_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = validate_title(title.into())?;
        let description = validate_description(description.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description,
            due_date,
            status: TaskStatus::Pending,
            owner_id,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
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

    /// Returns the tombstone timestamp, if the task was deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the task carries a tombstone.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update.
    ///
    /// Returns the status transition when the change set carried a status
    /// that differs from the current one, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskDomainError`] when a supplied text field fails
    /// validation; the task is left unchanged in that case.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<Option<StatusTransition>, TaskDomainError> {
        let title = changes.title.map(validate_title).transpose()?;
        let description = changes.description.map(validate_description).transpose()?;

        if let Some(valid_title) = title {
            self.title = valid_title;
        }
        if let Some(valid_description) = description {
            self.description = valid_description;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = Some(due_date);
        }
        let transition = changes.status.and_then(|status| self.set_status(status));
        self.touch(clock);
        Ok(transition)
    }

    /// Transitions the task to a new status.
    ///
    /// Returns `None` without touching the task when the new status equals
    /// the current one.
    pub fn change_status(
        &mut self,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Option<StatusTransition> {
        let transition = self.set_status(status)?;
        self.touch(clock);
        Some(transition)
    }

    /// Marks the task as deleted.
    ///
    /// Deletion does not cascade to assignment, event, or notification
    /// records.
    pub fn soft_delete(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        if self.deleted_at.is_none() {
            self.deleted_at = Some(timestamp);
            self.updated_at = timestamp;
        }
    }

    fn set_status(&mut self, status: TaskStatus) -> Option<StatusTransition> {
        if self.status == status {
            return None;
        }
        let transition = StatusTransition {
            from: self.status,
            to: status,
        };
        self.status = status;
        Some(transition)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_title(value: String) -> Result<String, TaskDomainError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    let length = normalized.chars().count();
    if length > TEXT_FIELD_LIMIT {
        return Err(TaskDomainError::TitleTooLong {
            limit: TEXT_FIELD_LIMIT,
            length,
        });
    }
    Ok(normalized.to_owned())
}

fn validate_description(value: String) -> Result<String, TaskDomainError> {
    let length = value.chars().count();
    if length > TEXT_FIELD_LIMIT {
        return Err(TaskDomainError::DescriptionTooLong {
            limit: TEXT_FIELD_LIMIT,
            length,
        });
    }
    Ok(value)
}
