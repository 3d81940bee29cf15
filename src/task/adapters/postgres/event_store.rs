//! `PostgreSQL` implementation of the append-only task event store.

use super::{
    models::{NewTaskEventRow, TaskEventRow},
    schema::task_events,
};
use crate::task::{
    domain::{PersistedTaskEventData, TaskEvent, TaskEventBody, TaskEventId, TaskId},
    ports::{TaskEventStore, TaskEventStoreError, TaskEventStoreResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task event store.
#[derive(Debug, Clone)]
pub struct PostgresTaskEventStore {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl PostgresTaskEventStore {
    /// Creates a new event store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskEventStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskEventStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskEventStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskEventStoreError::persistence)?
    }
}

#[async_trait]
impl TaskEventStore for PostgresTaskEventStore {
    async fn append(&self, event: &TaskEvent) -> TaskEventStoreResult<()> {
        let event_id = event.id();
        let new_row = NewTaskEventRow {
            id: event.id().into_inner(),
            task_id: event.task_id().into_inner(),
            actor_id: event.actor_id().into_inner(),
            event_type: event.kind().as_str().to_owned(),
            payload: event.payload(),
            message: event.message().to_owned(),
            created_at: event.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(task_events::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskEventStoreError::DuplicateEvent(event_id)
                    }
                    _ => TaskEventStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn events_for_task(&self, task_id: TaskId) -> TaskEventStoreResult<Vec<TaskEvent>> {
        self.run_blocking(move |connection| {
            let rows = task_events::table
                .filter(task_events::task_id.eq(task_id.into_inner()))
                .order(task_events::created_at.asc())
                .select(TaskEventRow::as_select())
                .load::<TaskEventRow>(connection)
                .map_err(TaskEventStoreError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn row_to_event(row: TaskEventRow) -> TaskEventStoreResult<TaskEvent> {
    let body = serde_json::from_value::<TaskEventBody>(row.payload)
        .map_err(TaskEventStoreError::persistence)?;
    let data = PersistedTaskEventData {
        id: TaskEventId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        actor_id: UserId::from_uuid(row.actor_id),
        body,
        message: row.message,
        created_at: row.created_at,
    };
    Ok(TaskEvent::from_persisted(data))
}
