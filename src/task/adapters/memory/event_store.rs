//! In-memory append-only event store for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskEvent, TaskId},
    ports::{TaskEventStore, TaskEventStoreError, TaskEventStoreResult},
};

/// Thread-safe in-memory task event store.
///
/// Events are kept in append order, which matches creation order for the
/// single-writer test scenarios this adapter serves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskEventStore {
    state: Arc<RwLock<Vec<TaskEvent>>>,
}

impl InMemoryTaskEventStore {
    /// Creates an empty in-memory event store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskEventStoreError {
    TaskEventStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskEventStore for InMemoryTaskEventStore {
    async fn append(&self, event: &TaskEvent) -> TaskEventStoreResult<()> {
        let mut events = self.state.write().map_err(lock_poisoned)?;
        if events.iter().any(|existing| existing.id() == event.id()) {
            return Err(TaskEventStoreError::DuplicateEvent(event.id()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn events_for_task(&self, task_id: TaskId) -> TaskEventStoreResult<Vec<TaskEvent>> {
        let events = self.state.read().map_err(lock_poisoned)?;
        Ok(events
            .iter()
            .filter(|event| event.task_id() == task_id)
            .cloned()
            .collect())
    }
}
