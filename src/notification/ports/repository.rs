//! Repository port for notification persistence and inbox draining.

use crate::notification::domain::Notification;
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a batch of notifications from one event's fan-out.
    ///
    /// The batch commits all-or-nothing: a failure leaves none of the given
    /// notifications persisted.
    async fn store_batch(&self, notifications: &[Notification])
    -> NotificationRepositoryResult<()>;

    /// Atomically returns the user's unread notifications, oldest first,
    /// marking each one read at the given instant.
    ///
    /// A second call without intervening fan-out returns an empty list.
    async fn claim_unread(
        &self,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Returns the number of unread notifications addressed to the user.
    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<usize>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
