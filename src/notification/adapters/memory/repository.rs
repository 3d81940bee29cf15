//! In-memory repository for notification tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::Notification,
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory notification repository.
///
/// Notifications are kept in insertion order, which matches creation order
/// for the single-writer test scenarios this adapter serves.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored notification, for test assertions.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn all(&self) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.state.read().map_err(lock_poisoned)?;
        Ok(notifications.clone())
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store_batch(
        &self,
        notifications: &[Notification],
    ) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.extend_from_slice(notifications);
        Ok(())
    }

    async fn claim_unread(
        &self,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let mut claimed = Vec::new();
        for notification in state.iter_mut() {
            if notification.user_id() == user_id && !notification.is_read() {
                notification.mark_read(read_at);
                claimed.push(notification.clone());
            }
        }
        Ok(claimed)
    }

    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .iter()
            .filter(|n| n.user_id() == user_id && !n.is_read())
            .count())
    }
}
