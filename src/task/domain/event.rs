//! Write-once task event records with precomputed notification messages.

use super::{ParseTaskEventKindError, StatusTransition, Task, TaskDomainError, TaskEventId, TaskId, TaskStatus};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Template for assignment event messages.
const ASSIGNED_MESSAGE_TEMPLATE: &str =
    "Task '{{ title }}' has been assigned to {{ assignee }} by {{ actor }}.";

/// Template for status change event messages.
const STATUS_MESSAGE_TEMPLATE: &str =
    "Task '{{ title }}' status changed from {{ old_status }} to {{ new_status }} by {{ actor }}.";

/// Discriminant for task event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskEventKind {
    /// A user was assigned to the task.
    TaskAssigned,
    /// The task status changed.
    TaskStatusUpdated,
}

impl TaskEventKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "TASK_ASSIGNED",
            Self::TaskStatusUpdated => "TASK_STATUS_UPDATED",
        }
    }
}

impl TryFrom<&str> for TaskEventKind {
    type Error = ParseTaskEventKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "TASK_ASSIGNED" => Ok(Self::TaskAssigned),
            "TASK_STATUS_UPDATED" => Ok(Self::TaskStatusUpdated),
            _ => Err(ParseTaskEventKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured payload of a task event, tagged by variant shape.
///
/// The two variants share the save-and-notify contract; a tagged union
/// avoids dispatch machinery for two fixed shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskEventBody {
    /// Payload of a [`TaskEventKind::TaskAssigned`] event.
    Assigned {
        /// The user who was assigned.
        assignee_id: UserId,
    },
    /// Payload of a [`TaskEventKind::TaskStatusUpdated`] event.
    StatusUpdated {
        /// Status before the change.
        old_status: TaskStatus,
        /// Status after the change.
        new_status: TaskStatus,
    },
}

impl TaskEventBody {
    /// Returns the event kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        match self {
            Self::Assigned { .. } => TaskEventKind::TaskAssigned,
            Self::StatusUpdated { .. } => TaskEventKind::TaskStatusUpdated,
        }
    }
}

/// Immutable record of one domain occurrence on a task.
///
/// Events are created exactly once per real transition, never mutated, and
/// never deleted. The human-readable message is precomputed at construction
/// so notifications can copy it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    id: TaskEventId,
    task_id: TaskId,
    actor_id: UserId,
    body: TaskEventBody,
    message: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskEventData {
    /// Persisted event identifier.
    pub id: TaskEventId,
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted actor identifier.
    pub actor_id: UserId,
    /// Persisted structured payload.
    pub body: TaskEventBody,
    /// Persisted human-readable message.
    pub message: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TaskEvent {
    /// Creates an assignment event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MessageTemplate`] when message rendering
    /// fails.
    pub fn assignment(
        task: &Task,
        actor: &User,
        assignee: &User,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let message = render_message(
            TaskEventKind::TaskAssigned,
            ASSIGNED_MESSAGE_TEMPLATE,
            context! {
                title => task.title(),
                assignee => assignee.username().as_str(),
                actor => actor.username().as_str(),
            },
        )?;
        Ok(Self {
            id: TaskEventId::new(),
            task_id: task.id(),
            actor_id: actor.id(),
            body: TaskEventBody::Assigned {
                assignee_id: assignee.id(),
            },
            message,
            created_at: clock.utc(),
        })
    }

    /// Creates a status change event from a realised transition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MessageTemplate`] when message rendering
    /// fails.
    pub fn status_update(
        task: &Task,
        actor: &User,
        transition: StatusTransition,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let message = render_message(
            TaskEventKind::TaskStatusUpdated,
            STATUS_MESSAGE_TEMPLATE,
            context! {
                title => task.title(),
                old_status => transition.from.as_str(),
                new_status => transition.to.as_str(),
                actor => actor.username().as_str(),
            },
        )?;
        Ok(Self {
            id: TaskEventId::new(),
            task_id: task.id(),
            actor_id: actor.id(),
            body: TaskEventBody::StatusUpdated {
                old_status: transition.from,
                new_status: transition.to,
            },
            message,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskEventData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            actor_id: data.actor_id,
            body: data.body,
            message: data.message,
            created_at: data.created_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> TaskEventId {
        self.id
    }

    /// Returns the task the event belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> TaskEventKind {
        self.body.kind()
    }

    /// Returns the structured payload body.
    #[must_use]
    pub const fn body(&self) -> &TaskEventBody {
        &self.body
    }

    /// Returns the structured payload as JSON.
    ///
    /// Falls back to `null` in the unreachable case that the payload fails
    /// to serialise.
    #[must_use]
    pub fn payload(&self) -> Value {
        serde_json::to_value(&self.body).unwrap_or(Value::Null)
    }

    /// Returns the precomputed human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn render_message(
    kind: TaskEventKind,
    template: &str,
    template_context: minijinja::Value,
) -> Result<String, TaskDomainError> {
    let environment = Environment::new();
    environment
        .render_str(template, template_context)
        .map_err(|error| TaskDomainError::MessageTemplate {
            kind: kind.as_str(),
            reason: error.to_string(),
        })
}
