//! `PostgreSQL` adapters for task lifecycle persistence.

mod event_store;
mod models;
mod repository;
mod schema;

pub use event_store::PostgresTaskEventStore;
pub use repository::{PostgresTaskRepository, TaskPgPool};
