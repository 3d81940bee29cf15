//! Repository port for task and assignment persistence.

use crate::task::domain::{Task, TaskAssignment, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task and assignment persistence contract.
///
/// Lookup operations filter tombstoned records; revocation history stays in
/// storage but is never returned as active.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (fields, status, tombstone).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::TaskNotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a non-tombstoned task by identifier.
    ///
    /// Returns `None` when the task does not exist or carries a tombstone.
    async fn find_active(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all non-tombstoned tasks owned by the given user.
    async fn list_owned_by(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns all non-tombstoned tasks the given user is actively assigned
    /// to.
    async fn list_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores the assignment unless an active one already exists for its
    /// (task, user) pair.
    ///
    /// The check and the insert happen as one atomic operation, so two
    /// concurrent duplicate requests cannot both insert. Returns `true`
    /// when the assignment was inserted, `false` when an active record
    /// already existed.
    async fn add_assignment_if_absent(
        &self,
        assignment: &TaskAssignment,
    ) -> TaskRepositoryResult<bool>;

    /// Returns the active assignments for a task.
    async fn active_assignments(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskAssignment>>;

    /// Finds the active assignment for a (task, user) pair.
    ///
    /// Returns `None` when the user is not currently assigned.
    async fn find_active_assignment(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Option<TaskAssignment>>;

    /// Persists changes to an existing assignment (revocation tombstone).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::AssignmentNotFound`] when the
    /// assignment record does not exist.
    async fn update_assignment(&self, assignment: &TaskAssignment) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The assignment record was not found.
    #[error("assignment not found for task {task_id} and user {user_id}")]
    AssignmentNotFound {
        /// Task the assignment belongs to.
        task_id: TaskId,
        /// User the assignment belongs to.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
