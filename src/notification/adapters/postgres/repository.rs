//! `PostgreSQL` repository implementation for notification storage.

use super::{
    models::{NewNotificationRow, NotificationRow},
    schema::notifications,
};
use crate::notification::{
    domain::{Notification, NotificationId, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskEventId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store_batch(
        &self,
        batch: &[Notification],
    ) -> NotificationRepositoryResult<()> {
        let rows: Vec<NewNotificationRow> = batch.iter().map(to_new_row).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, diesel::result::Error, _>(|inner| {
                    diesel::insert_into(notifications::table)
                        .values(&rows)
                        .execute(inner)?;
                    Ok(())
                })
                .map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn claim_unread(
        &self,
        user_id: UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        self.run_blocking(move |connection| {
            let mut claimed = diesel::update(
                notifications::table
                    .filter(notifications::user_id.eq(user_id.into_inner()))
                    .filter(notifications::read_at.is_null()),
            )
            .set(notifications::read_at.eq(read_at))
            .returning(NotificationRow::as_returning())
            .get_results::<NotificationRow>(connection)
            .map_err(NotificationRepositoryError::persistence)?;
            claimed.sort_by_key(|row| row.created_at);
            Ok(claimed.into_iter().map(row_to_notification).collect())
        })
        .await
    }

    async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let count: i64 = notifications::table
                .filter(notifications::user_id.eq(user_id.into_inner()))
                .filter(notifications::read_at.is_null())
                .count()
                .get_result(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            usize::try_from(count).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(notification: &Notification) -> NewNotificationRow {
    NewNotificationRow {
        id: notification.id().into_inner(),
        user_id: notification.user_id().into_inner(),
        task_event_id: notification.task_event_id().into_inner(),
        message: notification.message().to_owned(),
        read_at: notification.read_at(),
        created_at: notification.created_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> Notification {
    Notification::from_persisted(PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        user_id: UserId::from_uuid(row.user_id),
        task_event_id: TaskEventId::from_uuid(row.task_event_id),
        message: row.message,
        read_at: row.read_at,
        created_at: row.created_at,
    })
}
