//! Fan-out engine turning one saved task event into participant
//! notifications.

use crate::notification::{
    domain::Notification,
    ports::{NotificationRepository, NotificationRepositoryError},
};
use crate::task::{
    domain::{Task, TaskEvent},
    ports::TaskRepository,
    services::{TaskAccess, TaskAccessError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by the fan-out engine.
#[derive(Debug, Error)]
pub enum FanOutError {
    /// Participant lookup failed.
    #[error(transparent)]
    Access(#[from] TaskAccessError),

    /// Persisting the notification batch failed.
    #[error(transparent)]
    Notification(#[from] NotificationRepositoryError),
}

/// Result type for fan-out operations.
pub type FanOutResult<T> = Result<T, FanOutError>;

/// Notification fan-out engine.
///
/// Participant membership is evaluated at dispatch time, which the task
/// service calls immediately after the event is persisted; later assignment
/// changes never notify retroactively.
#[derive(Clone)]
pub struct NotificationFanOut<T, N, C>
where
    T: TaskRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    access: TaskAccess<T>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<T, N, C> NotificationFanOut<T, N, C>
where
    T: TaskRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new fan-out engine.
    #[must_use]
    pub const fn new(tasks: Arc<T>, notifications: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            access: TaskAccess::new(tasks),
            notifications,
            clock,
        }
    }

    /// Fans a persisted event out to the task's participants.
    ///
    /// Computes the participant set (owner plus active assignees), removes
    /// the actor, and commits one unread notification per remaining
    /// participant as a single batch. Returns the created notifications.
    ///
    /// # Errors
    ///
    /// Returns [`FanOutError`] when participant lookup or the batch write
    /// fails; a batch failure persists none of the notifications.
    pub async fn dispatch(&self, task: &Task, event: &TaskEvent) -> FanOutResult<Vec<Notification>> {
        let mut participant_ids = self.access.participant_ids(task).await?;
        // An actor never notifies itself.
        participant_ids.remove(&event.actor_id());

        let mut recipients: Vec<UserId> = participant_ids.into_iter().collect();
        recipients.sort_unstable();

        let notifications: Vec<Notification> = recipients
            .into_iter()
            .map(|user_id| Notification::for_event(event, user_id, &*self.clock))
            .collect();
        if !notifications.is_empty() {
            self.notifications.store_batch(&notifications).await?;
        }
        Ok(notifications)
    }
}
