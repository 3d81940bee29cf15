//! Access control gating every task mutation and view.
//!
//! Two predicates guard all task operations: `require_owner` for
//! owner-controlled actions (field updates, deletion, assignee management)
//! and `require_participant` for collaborative actions (detail view, status
//! transition). Status is deliberately participant-writable while the other
//! fields stay owner-only.

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by access control checks.
#[derive(Debug, Clone, Error)]
pub enum TaskAccessError {
    /// The task does not exist or carries a tombstone.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller is authenticated but not authorised for the action.
    #[error("user {user_id} is not authorized to perform this action on task {task_id}")]
    Forbidden {
        /// Task the action targeted.
        task_id: TaskId,
        /// Caller that was rejected.
        user_id: UserId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for access control operations.
pub type TaskAccessResult<T> = Result<T, TaskAccessError>;

/// Access control service over task ownership and participation.
#[derive(Clone)]
pub struct TaskAccess<R>
where
    R: TaskRepository,
{
    tasks: Arc<R>,
}

impl<R> TaskAccess<R>
where
    R: TaskRepository,
{
    /// Creates a new access control service.
    #[must_use]
    pub const fn new(tasks: Arc<R>) -> Self {
        Self { tasks }
    }

    /// Fetches a non-tombstoned task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] when the task is absent or
    /// soft-deleted.
    pub async fn resolve_task(&self, task_id: TaskId) -> TaskAccessResult<Task> {
        self.tasks
            .find_active(task_id)
            .await?
            .ok_or(TaskAccessError::NotFound(task_id))
    }

    /// Requires the user to be the task owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Forbidden`] when the user does not own
    /// the task.
    pub fn require_owner(task: &Task, user_id: UserId) -> TaskAccessResult<()> {
        if task.owner_id() == user_id {
            Ok(())
        } else {
            Err(TaskAccessError::Forbidden {
                task_id: task.id(),
                user_id,
            })
        }
    }

    /// Requires the user to be a task participant (owner or active
    /// assignee).
    ///
    /// The owner is always a participant, even with zero assignment
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Forbidden`] when the user is neither the
    /// owner nor actively assigned.
    pub async fn require_participant(&self, task: &Task, user_id: UserId) -> TaskAccessResult<()> {
        if task.owner_id() == user_id {
            return Ok(());
        }
        let assignment = self
            .tasks
            .find_active_assignment(task.id(), user_id)
            .await?;
        if assignment.is_some() {
            Ok(())
        } else {
            Err(TaskAccessError::Forbidden {
                task_id: task.id(),
                user_id,
            })
        }
    }

    /// Returns the participant set: the owner plus every active assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Repository`] when the assignment lookup
    /// fails.
    pub async fn participant_ids(&self, task: &Task) -> TaskAccessResult<HashSet<UserId>> {
        let mut ids = HashSet::new();
        ids.insert(task.owner_id());
        for assignment in self.tasks.active_assignments(task.id()).await? {
            ids.insert(assignment.user_id());
        }
        Ok(ids)
    }

    /// Resolves a task and requires the caller to own it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] or
    /// [`TaskAccessError::Forbidden`] as for the individual checks.
    pub async fn resolve_for_owner(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskAccessResult<Task> {
        let task = self.resolve_task(task_id).await?;
        Self::require_owner(&task, user_id)?;
        Ok(task)
    }

    /// Resolves a task and requires the caller to participate in it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] or
    /// [`TaskAccessError::Forbidden`] as for the individual checks.
    pub async fn resolve_for_participant(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskAccessResult<Task> {
        let task = self.resolve_task(task_id).await?;
        self.require_participant(&task, user_id).await?;
        Ok(task)
    }
}
