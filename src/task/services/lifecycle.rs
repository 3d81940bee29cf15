//! Task lifecycle orchestration: mutations, events, and fan-out.
//!
//! Every mutation runs the same pipeline: access check, state change,
//! event construction, event append, notification fan-out. Requests that
//! change nothing (same status, already-assigned user) stop before the
//! event step and produce no notifications.

use crate::notification::{
    ports::NotificationRepository,
    services::{FanOutError, NotificationFanOut},
};
use crate::task::{
    domain::{Task, TaskAssignment, TaskChanges, TaskDomainError, TaskEvent, TaskId, TaskStatus},
    ports::{TaskEventStore, TaskEventStoreError, TaskRepository, TaskRepositoryError},
    services::access::{TaskAccess, TaskAccessError},
};
use crate::user::{
    domain::{User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: None,
        }
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task detail view with resolved owner and active assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    /// The task record.
    pub task: Task,
    /// The owning user.
    pub owner: User,
    /// Currently assigned users, in assignment order.
    pub assignees: Vec<User>,
}

/// Tasks visible to one user, split by relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListing {
    /// Tasks the user owns.
    pub owned: Vec<Task>,
    /// Tasks the user is actively assigned to.
    pub assigned: Vec<Task>,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Access control rejected the request.
    #[error(transparent)]
    Access(#[from] TaskAccessError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// One or more referenced users do not exist.
    #[error("users not found: {}", format_ids(.0))]
    UsersNotFound(Vec<UserId>),

    /// The user has no active assignment on the task.
    #[error("user {user_id} is not assigned to task {task_id}")]
    AssignmentNotFound {
        /// Task the removal targeted.
        task_id: TaskId,
        /// User that was not assigned.
        user_id: UserId,
    },

    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// User repository operation failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),

    /// Event append failed; no notifications were created.
    #[error(transparent)]
    EventStore(#[from] TaskEventStoreError),

    /// Notification fan-out failed.
    #[error(transparent)]
    FanOut(#[from] FanOutError),
}

/// Result type for task lifecycle operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<R, U, E, N, C>
where
    R: TaskRepository,
    U: UserRepository,
    E: TaskEventStore,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    users: Arc<U>,
    events: Arc<E>,
    access: TaskAccess<R>,
    fanout: NotificationFanOut<R, N, C>,
    clock: Arc<C>,
}

impl<R, U, E, N, C> TaskService<R, U, E, N, C>
where
    R: TaskRepository,
    U: UserRepository,
    E: TaskEventStore,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(
        tasks: Arc<R>,
        users: Arc<U>,
        events: Arc<E>,
        notifications: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        let access = TaskAccess::new(Arc::clone(&tasks));
        let fanout = NotificationFanOut::new(Arc::clone(&tasks), notifications, Arc::clone(&clock));
        Self {
            tasks,
            users,
            events,
            access,
            fanout,
            clock,
        }
    }

    /// Creates a new pending task owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when field validation fails or
    /// a repository error when persistence fails.
    pub async fn create_task(
        &self,
        owner_id: UserId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let task = Task::new(
            owner_id,
            request.title,
            request.description,
            request.due_date,
            &*self.clock,
        )?;
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Lists the tasks the user owns and the tasks the user is assigned
    /// to, excluding soft-deleted tasks from both.
    ///
    /// # Errors
    ///
    /// Returns a repository error when either lookup fails.
    pub async fn list_tasks_for(&self, user_id: UserId) -> TaskServiceResult<TaskListing> {
        let owned = self.tasks.list_owned_by(user_id).await?;
        let assigned = self.tasks.list_assigned_to(user_id).await?;
        Ok(TaskListing { owned, assigned })
    }

    /// Returns the task detail view for a participant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`] or [`TaskAccessError::Forbidden`]
    /// through [`TaskServiceError::Access`] when the caller may not view the
    /// task.
    pub async fn get_task_detail(
        &self,
        task_id: TaskId,
        requester: UserId,
    ) -> TaskServiceResult<TaskDetail> {
        let task = self.access.resolve_for_participant(task_id, requester).await?;
        self.task_detail(task).await
    }

    /// Applies a partial update through the owner-only channel.
    ///
    /// A supplied status that differs from the current one is a status
    /// transition: it is recorded as an event and fanned out.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when the caller is not the
    /// owner, [`TaskServiceError::Domain`] when a field fails validation,
    /// or a repository error when persistence fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        requester: UserId,
        changes: TaskChanges,
    ) -> TaskServiceResult<Task> {
        let mut task = self.access.resolve_for_owner(task_id, requester).await?;
        let transition = task.apply_changes(changes, &*self.clock)?;
        self.tasks.update(&task).await?;

        if let Some(realised) = transition {
            let actor = self.fetch_user(requester).await?;
            let event = TaskEvent::status_update(&task, &actor, realised, &*self.clock)?;
            self.record_event(&task, event).await?;
        }
        Ok(task)
    }

    /// Transitions the task status through the participant channel.
    ///
    /// Supplying the current status succeeds as a no-op with no event and
    /// no notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when the caller is neither the
    /// owner nor an active assignee, or a repository error when persistence
    /// fails.
    pub async fn update_task_status(
        &self,
        task_id: TaskId,
        requester: UserId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        let mut task = self
            .access
            .resolve_for_participant(task_id, requester)
            .await?;
        let Some(transition) = task.change_status(status, &*self.clock) else {
            return Ok(task);
        };
        self.tasks.update(&task).await?;

        let actor = self.fetch_user(requester).await?;
        let event = TaskEvent::status_update(&task, &actor, transition, &*self.clock)?;
        self.record_event(&task, event).await?;
        Ok(task)
    }

    /// Soft-deletes the task.
    ///
    /// Deletion does not cascade to assignment, event, or notification
    /// records.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when the caller is not the
    /// owner, or a repository error when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId, requester: UserId) -> TaskServiceResult<()> {
        let mut task = self.access.resolve_for_owner(task_id, requester).await?;
        task.soft_delete(&*self.clock);
        self.tasks.update(&task).await?;
        Ok(())
    }

    /// Assigns users to the task, owner-only.
    ///
    /// All candidate identifiers must resolve to existing users; otherwise
    /// the call fails listing the missing identifiers and assigns nothing.
    /// Users already actively assigned are skipped without error or event.
    /// Each newly added assignee is recorded as one assignment event and
    /// fanned out. Returns the detail view with the full current assignee
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when the caller is not the
    /// owner, [`TaskServiceError::UsersNotFound`] when any identifier is
    /// unknown, or a repository error when persistence fails.
    pub async fn assign_users(
        &self,
        task_id: TaskId,
        requester: UserId,
        user_ids: &[UserId],
    ) -> TaskServiceResult<TaskDetail> {
        let task = self.access.resolve_for_owner(task_id, requester).await?;
        let candidates = self.resolve_users(user_ids).await?;
        let actor = self.fetch_user(requester).await?;

        let mut newly_assigned = Vec::new();
        for candidate in candidates {
            let assignment = TaskAssignment::new(task.id(), candidate.id(), &*self.clock);
            let inserted = self.tasks.add_assignment_if_absent(&assignment).await?;
            if inserted {
                newly_assigned.push(candidate);
            }
        }

        for assignee in &newly_assigned {
            let event = TaskEvent::assignment(&task, &actor, assignee, &*self.clock)?;
            self.record_event(&task, event).await?;
        }

        self.task_detail(task).await
    }

    /// Revokes a user's active assignment, owner-only.
    ///
    /// Revocation generates no event and no notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Access`] when the caller is not the
    /// owner, [`TaskServiceError::AssignmentNotFound`] when the user has no
    /// active assignment, or a repository error when persistence fails.
    pub async fn remove_assignee(
        &self,
        task_id: TaskId,
        requester: UserId,
        user_id: UserId,
    ) -> TaskServiceResult<()> {
        let task = self.access.resolve_for_owner(task_id, requester).await?;
        let mut assignment = self
            .tasks
            .find_active_assignment(task.id(), user_id)
            .await?
            .ok_or(TaskServiceError::AssignmentNotFound {
                task_id: task.id(),
                user_id,
            })?;
        assignment.revoke(&*self.clock);
        self.tasks.update_assignment(&assignment).await?;
        Ok(())
    }

    /// Appends a persisted event and fans it out exactly once.
    ///
    /// An append failure surfaces before any notification is created; once
    /// the append succeeds, fan-out runs for that event.
    async fn record_event(&self, task: &Task, event: TaskEvent) -> TaskServiceResult<()> {
        self.events.append(&event).await?;
        self.fanout.dispatch(task, &event).await?;
        Ok(())
    }

    async fn task_detail(&self, task: Task) -> TaskServiceResult<TaskDetail> {
        let owner = self.fetch_user(task.owner_id()).await?;
        let assignments = self.tasks.active_assignments(task.id()).await?;
        let assignee_ids: Vec<UserId> = assignments.iter().map(TaskAssignment::user_id).collect();
        let assignees = self.resolve_users(&assignee_ids).await?;
        Ok(TaskDetail {
            task,
            owner,
            assignees,
        })
    }

    async fn fetch_user(&self, user_id: UserId) -> TaskServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| TaskServiceError::UsersNotFound(vec![user_id]))
    }

    /// Resolves every identifier to an existing user, preserving the order
    /// of first appearance and dropping duplicates.
    async fn resolve_users(&self, user_ids: &[UserId]) -> TaskServiceResult<Vec<User>> {
        let mut seen = HashSet::new();
        let unique: Vec<UserId> = user_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let found = self.users.find_many(&unique).await?;
        let found_ids: HashSet<UserId> = found.iter().map(User::id).collect();
        let missing: Vec<UserId> = unique
            .iter()
            .copied()
            .filter(|id| !found_ids.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(TaskServiceError::UsersNotFound(missing));
        }

        // find_many does not guarantee order; restore request order.
        let mut by_id: HashMap<UserId, User> =
            found.into_iter().map(|user| (user.id(), user)).collect();
        Ok(unique.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}

fn format_ids(ids: &[UserId]) -> String {
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    rendered.join(", ")
}
