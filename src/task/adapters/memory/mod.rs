//! In-memory task persistence for tests.

mod event_store;
mod repository;

pub use event_store::InMemoryTaskEventStore;
pub use repository::InMemoryTaskRepository;
