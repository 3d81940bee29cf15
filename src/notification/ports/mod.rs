//! Port contracts for notification persistence.

mod repository;

pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
