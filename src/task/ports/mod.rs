//! Port contracts for task persistence and event storage.

mod event_store;
mod repository;

pub use event_store::{TaskEventStore, TaskEventStoreError, TaskEventStoreResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
