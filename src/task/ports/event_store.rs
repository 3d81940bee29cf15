//! Append-only storage port for task events.

use crate::task::domain::{TaskEvent, TaskEventId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task event store operations.
pub type TaskEventStoreResult<T> = Result<T, TaskEventStoreError>;

/// Write-once task event storage contract.
///
/// Events have no update or delete operation; the log is append-only and
/// ordered by creation time per task.
#[async_trait]
pub trait TaskEventStore: Send + Sync {
    /// Appends a new event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventStoreError::DuplicateEvent`] when the event ID
    /// already exists.
    async fn append(&self, event: &TaskEvent) -> TaskEventStoreResult<()>;

    /// Returns the events recorded for a task, oldest first.
    async fn events_for_task(&self, task_id: TaskId) -> TaskEventStoreResult<Vec<TaskEvent>>;
}

/// Errors returned by task event store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskEventStoreError {
    /// An event with the same identifier already exists.
    #[error("duplicate event identifier: {0}")]
    DuplicateEvent(TaskEventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEventStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
