//! Access control tests for ownership and participation gates.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskAssignment, TaskId},
    ports::TaskRepository,
    services::{TaskAccess, TaskAccessError},
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestAccess = TaskAccess<InMemoryTaskRepository>;

struct Harness {
    repository: Arc<InMemoryTaskRepository>,
    access: TestAccess,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let access = TaskAccess::new(Arc::clone(&repository));
    Harness { repository, access }
}

async fn stored_task(harness: &Harness, owner_id: UserId) -> Task {
    let task =
        Task::new(owner_id, "gated", "", None, &DefaultClock).expect("task should be valid");
    harness
        .repository
        .store(&task)
        .await
        .expect("store should succeed");
    task
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_task_rejects_unknown_identifier(harness: Harness) {
    let result = harness.access.resolve_task(TaskId::new()).await;
    assert!(matches!(result, Err(TaskAccessError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_task_rejects_soft_deleted_task(harness: Harness) {
    let owner = UserId::new();
    let mut task = stored_task(&harness, owner).await;
    task.soft_delete(&DefaultClock);
    harness
        .repository
        .update(&task)
        .await
        .expect("update should succeed");

    let result = harness.access.resolve_task(task.id()).await;
    assert!(matches!(result, Err(TaskAccessError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_passes_both_gates(harness: Harness) {
    let owner = UserId::new();
    let task = stored_task(&harness, owner).await;

    assert!(TestAccess::require_owner(&task, owner).is_ok());
    assert!(harness.access.require_participant(&task, owner).await.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_assignee_is_participant_but_not_owner(harness: Harness) {
    let owner = UserId::new();
    let assignee = UserId::new();
    let task = stored_task(&harness, owner).await;
    let assignment = TaskAssignment::new(task.id(), assignee, &DefaultClock);
    harness
        .repository
        .add_assignment_if_absent(&assignment)
        .await
        .expect("assignment should succeed");

    assert!(
        harness
            .access
            .require_participant(&task, assignee)
            .await
            .is_ok()
    );
    assert!(matches!(
        TestAccess::require_owner(&task, assignee),
        Err(TaskAccessError::Forbidden { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoked_assignee_is_no_longer_participant(harness: Harness) {
    let owner = UserId::new();
    let assignee = UserId::new();
    let task = stored_task(&harness, owner).await;
    let mut assignment = TaskAssignment::new(task.id(), assignee, &DefaultClock);
    harness
        .repository
        .add_assignment_if_absent(&assignment)
        .await
        .expect("assignment should succeed");
    assignment.revoke(&DefaultClock);
    harness
        .repository
        .update_assignment(&assignment)
        .await
        .expect("revocation should persist");

    let result = harness.access.require_participant(&task, assignee).await;
    assert!(matches!(result, Err(TaskAccessError::Forbidden { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_is_rejected_by_both_gates(harness: Harness) {
    let owner = UserId::new();
    let outsider = UserId::new();
    let task = stored_task(&harness, owner).await;

    let owner_check = harness.access.resolve_for_owner(task.id(), outsider).await;
    assert!(matches!(
        owner_check,
        Err(TaskAccessError::Forbidden { user_id, .. }) if user_id == outsider
    ));

    let participant_check = harness
        .access
        .resolve_for_participant(task.id(), outsider)
        .await;
    assert!(matches!(
        participant_check,
        Err(TaskAccessError::Forbidden { .. })
    ));
}
