//! Poll-based notification inbox with read-on-fetch semantics.

use crate::notification::ports::{NotificationRepository, NotificationRepositoryError};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the notification inbox.
#[derive(Debug, Error)]
pub enum NotificationInboxError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Result type for inbox operations.
pub type NotificationInboxResult<T> = Result<T, NotificationInboxError>;

/// Notification inbox service.
#[derive(Clone)]
pub struct NotificationInbox<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<N, C> NotificationInbox<N, C>
where
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new inbox service.
    #[must_use]
    pub const fn new(notifications: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            notifications,
            clock,
        }
    }

    /// Returns the user's unread notification messages, oldest first, and
    /// marks them read as a side effect of the fetch.
    ///
    /// There is no separate acknowledgement; a repeat call without new
    /// events returns an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationInboxError::Repository`] when the claim fails;
    /// nothing is marked read in that case.
    pub async fn fetch_and_mark_read(
        &self,
        user_id: UserId,
    ) -> NotificationInboxResult<Vec<String>> {
        let claimed = self
            .notifications
            .claim_unread(user_id, self.clock.utc())
            .await?;
        Ok(claimed
            .into_iter()
            .map(|notification| notification.message().to_owned())
            .collect())
    }

    /// Returns the number of unread notifications without marking anything
    /// read.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationInboxError::Repository`] when the count fails.
    pub async fn unread_count(&self, user_id: UserId) -> NotificationInboxResult<usize> {
        Ok(self.notifications.unread_count(user_id).await?)
    }
}
