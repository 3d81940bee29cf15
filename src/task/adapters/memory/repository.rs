//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{AssignmentId, Task, TaskAssignment, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    assignments: HashMap<AssignmentId, TaskAssignment>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn active_assignment_exists(state: &InMemoryTaskState, task_id: TaskId, user_id: UserId) -> bool {
    state
        .assignments
        .values()
        .any(|a| a.task_id() == task_id && a.user_id() == user_id && a.is_active())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_active(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| !task.is_deleted())
            .cloned())
    }

    async fn list_owned_by(&self, owner_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut owned: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.owner_id() == owner_id && !task.is_deleted())
            .cloned()
            .collect();
        owned.sort_by_key(Task::created_at);
        Ok(owned)
    }

    async fn list_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut assigned: Vec<Task> = state
            .assignments
            .values()
            .filter(|a| a.user_id() == user_id && a.is_active())
            .filter_map(|a| state.tasks.get(&a.task_id()))
            .filter(|task| !task.is_deleted())
            .cloned()
            .collect();
        assigned.sort_by_key(Task::created_at);
        Ok(assigned)
    }

    async fn add_assignment_if_absent(
        &self,
        assignment: &TaskAssignment,
    ) -> TaskRepositoryResult<bool> {
        // The existence check and the insert share one write lock, so
        // concurrent duplicate requests serialise here.
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if active_assignment_exists(&state, assignment.task_id(), assignment.user_id()) {
            return Ok(false);
        }
        state.assignments.insert(assignment.id(), assignment.clone());
        Ok(true)
    }

    async fn active_assignments(
        &self,
        task_id: TaskId,
    ) -> TaskRepositoryResult<Vec<TaskAssignment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut active: Vec<TaskAssignment> = state
            .assignments
            .values()
            .filter(|a| a.task_id() == task_id && a.is_active())
            .cloned()
            .collect();
        active.sort_by_key(TaskAssignment::created_at);
        Ok(active)
    }

    async fn find_active_assignment(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Option<TaskAssignment>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .assignments
            .values()
            .find(|a| a.task_id() == task_id && a.user_id() == user_id && a.is_active())
            .cloned())
    }

    async fn update_assignment(&self, assignment: &TaskAssignment) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.assignments.contains_key(&assignment.id()) {
            return Err(TaskRepositoryError::AssignmentNotFound {
                task_id: assignment.task_id(),
                user_id: assignment.user_id(),
            });
        }
        state.assignments.insert(assignment.id(), assignment.clone());
        Ok(())
    }
}
