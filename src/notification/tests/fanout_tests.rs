//! Fan-out engine tests over participant membership and batch delivery.

use std::sync::Arc;

use crate::notification::{
    adapters::memory::InMemoryNotificationRepository,
    domain::Notification,
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
    services::{FanOutError, NotificationFanOut},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{StatusTransition, Task, TaskAssignment, TaskEvent, TaskStatus},
    ports::TaskRepository,
};
use crate::user::domain::{User, UserId, Username};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::DefaultClock;
use mockall::mock;
use rstest::{fixture, rstest};

mock! {
    NotificationStore {}

    #[async_trait]
    impl NotificationRepository for NotificationStore {
        async fn store_batch(
            &self,
            notifications: &[Notification],
        ) -> NotificationRepositoryResult<()>;

        async fn claim_unread(
            &self,
            user_id: UserId,
            read_at: DateTime<Utc>,
        ) -> NotificationRepositoryResult<Vec<Notification>>;

        async fn unread_count(&self, user_id: UserId) -> NotificationRepositoryResult<usize>;
    }
}

struct Harness {
    tasks: Arc<InMemoryTaskRepository>,
    notifications: Arc<InMemoryNotificationRepository>,
    fanout: NotificationFanOut<InMemoryTaskRepository, InMemoryNotificationRepository, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let fanout = NotificationFanOut::new(
        Arc::clone(&tasks),
        Arc::clone(&notifications),
        Arc::new(DefaultClock),
    );
    Harness {
        tasks,
        notifications,
        fanout,
    }
}

fn user(name: &str) -> User {
    let username = Username::new(name).expect("username should be valid");
    User::new(username, &DefaultClock)
}

async fn stored_task(harness: &Harness, owner_id: UserId) -> Task {
    let task =
        Task::new(owner_id, "fanned", "", None, &DefaultClock).expect("task should be valid");
    harness
        .tasks
        .store(&task)
        .await
        .expect("store should succeed");
    task
}

async fn assign(harness: &Harness, task: &Task, user_id: UserId) {
    let assignment = TaskAssignment::new(task.id(), user_id, &DefaultClock);
    harness
        .tasks
        .add_assignment_if_absent(&assignment)
        .await
        .expect("assignment should succeed");
}

fn status_event(task: &Task, actor: &User) -> TaskEvent {
    let transition = StatusTransition {
        from: TaskStatus::Pending,
        to: TaskStatus::InProgress,
    };
    TaskEvent::status_update(task, actor, transition, &DefaultClock).expect("event should render")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_notifies_every_participant_except_the_actor(harness: Harness) {
    let owner = user("alice");
    let acting = user("bob");
    let bystander = user("carol");
    let task = stored_task(&harness, owner.id()).await;
    assign(&harness, &task, acting.id()).await;
    assign(&harness, &task, bystander.id()).await;
    let event = status_event(&task, &acting);

    let created = harness
        .fanout
        .dispatch(&task, &event)
        .await
        .expect("dispatch should succeed");

    let recipients: Vec<UserId> = created.iter().map(Notification::user_id).collect();
    assert_eq!(created.len(), 2);
    assert!(recipients.contains(&owner.id()));
    assert!(recipients.contains(&bystander.id()));
    assert!(!recipients.contains(&acting.id()));
    for notification in &created {
        assert_eq!(notification.message(), event.message());
        assert_eq!(notification.task_event_id(), event.id());
        assert!(!notification.is_read());
    }

    let stored = harness
        .notifications
        .all()
        .expect("notification lookup should succeed");
    assert_eq!(stored, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_participates_without_any_assignment_record(harness: Harness) {
    let owner = user("alice");
    let acting = user("bob");
    let task = stored_task(&harness, owner.id()).await;
    assign(&harness, &task, acting.id()).await;
    let event = status_event(&task, &acting);

    let created = harness
        .fanout
        .dispatch(&task, &event)
        .await
        .expect("dispatch should succeed");

    assert_eq!(created.len(), 1);
    assert_eq!(created[0].user_id(), owner.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acting_owner_of_an_unassigned_task_notifies_nobody(harness: Harness) {
    let owner = user("alice");
    let task = stored_task(&harness, owner.id()).await;
    let event = status_event(&task, &owner);

    let created = harness
        .fanout
        .dispatch(&task, &event)
        .await
        .expect("dispatch should succeed");

    assert!(created.is_empty());
    assert!(
        harness
            .notifications
            .all()
            .expect("notification lookup should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revoked_assignees_are_not_notified(harness: Harness) {
    let owner = user("alice");
    let departed = user("bob");
    let task = stored_task(&harness, owner.id()).await;
    let mut assignment = TaskAssignment::new(task.id(), departed.id(), &DefaultClock);
    harness
        .tasks
        .add_assignment_if_absent(&assignment)
        .await
        .expect("assignment should succeed");
    assignment.revoke(&DefaultClock);
    harness
        .tasks
        .update_assignment(&assignment)
        .await
        .expect("revocation should persist");
    let event = status_event(&task, &owner);

    let created = harness
        .fanout
        .dispatch(&task, &event)
        .await
        .expect("dispatch should succeed");

    assert!(created.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_failure_surfaces_without_partial_delivery() {
    let owner = user("alice");
    let acting = user("bob");
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let task = Task::new(owner.id(), "doomed", "", None, &DefaultClock)
        .expect("task should be valid");
    tasks.store(&task).await.expect("store should succeed");
    let assignment = TaskAssignment::new(task.id(), acting.id(), &DefaultClock);
    tasks
        .add_assignment_if_absent(&assignment)
        .await
        .expect("assignment should succeed");

    let mut store = MockNotificationStore::new();
    store.expect_store_batch().times(1).returning(|_| {
        Err(NotificationRepositoryError::persistence(
            std::io::Error::other("connection lost"),
        ))
    });
    let fanout = NotificationFanOut::new(tasks, Arc::new(store), Arc::new(DefaultClock));
    let event = status_event(&task, &acting);

    let result = fanout.dispatch(&task, &event).await;

    assert!(matches!(result, Err(FanOutError::Notification(_))));
}
