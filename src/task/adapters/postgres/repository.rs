//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{AssignmentRow, NewAssignmentRow, NewTaskRow, TaskRow},
    schema::{task_assignments, tasks},
};
use crate::task::{
    domain::{
        AssignmentId, PersistedAssignmentData, PersistedTaskData, Task, TaskAssignment, TaskId,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_task_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let updated = task.clone();
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(updated.title().to_owned()),
                    tasks::description.eq(updated.description().to_owned()),
                    tasks::due_date.eq(updated.due_date()),
                    tasks::status.eq(updated.status().as_str().to_owned()),
                    tasks::updated_at.eq(updated.updated_at()),
                    tasks::deleted_at.eq(updated.deleted_at()),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_active(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_owned_by(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = task_assignments::table
                .inner_join(tasks::table.on(tasks::id.eq(task_assignments::task_id)))
                .filter(task_assignments::user_id.eq(user_id.into_inner()))
                .filter(task_assignments::deleted_at.is_null())
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn add_assignment_if_absent(
        &self,
        assignment: &TaskAssignment,
    ) -> TaskRepositoryResult<bool> {
        let new_row = to_new_assignment_row(assignment);
        self.run_blocking(move |connection| {
            // The partial unique index on active (task_id, user_id) pairs
            // turns the duplicate case into a no-op insert, closing the
            // check-then-act window.
            let affected = diesel::insert_into(task_assignments::table)
                .values(&new_row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn active_assignments(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<TaskAssignment>> {
        self.run_blocking(move |connection| {
            let rows = task_assignments::table
                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                .filter(task_assignments::deleted_at.is_null())
                .order(task_assignments::created_at.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignment).collect())
        })
        .await
    }

    async fn find_active_assignment(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Option<TaskAssignment>> {
        self.run_blocking(move |connection| {
            let row = task_assignments::table
                .filter(task_assignments::task_id.eq(task_id.into_inner()))
                .filter(task_assignments::user_id.eq(user_id.into_inner()))
                .filter(task_assignments::deleted_at.is_null())
                .select(AssignmentRow::as_select())
                .first::<AssignmentRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_assignment))
        })
        .await
    }

    async fn update_assignment(&self, assignment: &TaskAssignment) -> TaskRepositoryResult<()> {
        let assignment_id = assignment.id();
        let task_id = assignment.task_id();
        let user_id = assignment.user_id();
        let updated_at = assignment.updated_at();
        let deleted_at = assignment.deleted_at();
        self.run_blocking(move |connection| {
            let affected = diesel::update(
                task_assignments::table.filter(task_assignments::id.eq(assignment_id.into_inner())),
            )
            .set((
                task_assignments::updated_at.eq(updated_at),
                task_assignments::deleted_at.eq(deleted_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::AssignmentNotFound { task_id, user_id });
            }
            Ok(())
        })
        .await
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        owner_id: task.owner_id().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        deleted_at: task.deleted_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        due_date: row.due_date,
        status,
        owner_id: UserId::from_uuid(row.owner_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_new_assignment_row(assignment: &TaskAssignment) -> NewAssignmentRow {
    NewAssignmentRow {
        id: assignment.id().into_inner(),
        task_id: assignment.task_id().into_inner(),
        user_id: assignment.user_id().into_inner(),
        created_at: assignment.created_at(),
        updated_at: assignment.updated_at(),
        deleted_at: assignment.deleted_at(),
    }
}

fn row_to_assignment(row: AssignmentRow) -> TaskAssignment {
    TaskAssignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}
