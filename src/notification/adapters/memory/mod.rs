//! In-memory notification repository for tests.

mod repository;

pub use repository::InMemoryNotificationRepository;
