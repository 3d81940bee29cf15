//! Behavioural integration tests for the in-memory service composition.
//!
//! These tests exercise the task lifecycle service and notification inbox
//! together over the in-memory adapters, verifying the event-save-and-notify
//! contract in realistic collaboration flows.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]
#![expect(
    clippy::cognitive_complexity,
    reason = "Test functions may have higher complexity for full scenario coverage"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use taskpulse::notification::{
    adapters::memory::InMemoryNotificationRepository, services::NotificationInbox,
};
use taskpulse::task::{
    adapters::memory::{InMemoryTaskEventStore, InMemoryTaskRepository},
    domain::TaskStatus,
    services::{CreateTaskRequest, TaskAccessError, TaskService, TaskServiceError},
};
use taskpulse::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{User, Username},
    ports::UserRepository,
};

type TestService = TaskService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryTaskEventStore,
    InMemoryNotificationRepository,
    DefaultClock,
>;

type TestInbox = NotificationInbox<InMemoryNotificationRepository, DefaultClock>;

fn build_stack() -> (TestService, TestInbox, Arc<InMemoryUserRepository>) {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let events = Arc::new(InMemoryTaskEventStore::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let clock = Arc::new(DefaultClock);
    let service = TaskService::new(
        tasks,
        Arc::clone(&users),
        events,
        Arc::clone(&notifications),
        Arc::clone(&clock),
    );
    let inbox = NotificationInbox::new(notifications, clock);
    (service, inbox, users)
}

async fn register(users: &InMemoryUserRepository, name: &str) -> User {
    let username = Username::new(name).expect("valid username");
    let user = User::new(username, &DefaultClock);
    users.store(&user).await.expect("store user");
    user
}

/// Walks a full collaboration: creation, assignment, status changes from
/// both sides, and inbox draining for every participant.
#[tokio::test(flavor = "multi_thread")]
async fn complete_collaboration_flow_delivers_and_drains_notifications() {
    let (service, inbox, users) = build_stack();
    let alice = register(&users, "alice").await;
    let bob = register(&users, "bob").await;
    let carol = register(&users, "carol").await;

    let task = service
        .create_task(
            alice.id(),
            CreateTaskRequest::new("Prepare the launch", "checklist and rollback plan"),
        )
        .await
        .expect("create task");

    service
        .assign_users(task.id(), alice.id(), &[bob.id()])
        .await
        .expect("assign bob");

    // Bob starts the work; Alice later completes it through the owner
    // update channel.
    service
        .update_task_status(task.id(), bob.id(), TaskStatus::InProgress)
        .await
        .expect("bob starts work");
    service
        .update_task_status(task.id(), alice.id(), TaskStatus::Completed)
        .await
        .expect("alice completes work");

    // Alice acted twice and was notified once, by Bob's change.
    let alice_messages = inbox
        .fetch_and_mark_read(alice.id())
        .await
        .expect("fetch alice inbox");
    assert_eq!(alice_messages.len(), 1);
    assert_eq!(
        alice_messages[0],
        "Task 'Prepare the launch' status changed from PENDING to IN_PROGRESS by bob."
    );

    // Bob was notified of his assignment and of Alice's completion, in
    // that order.
    let bob_messages = inbox
        .fetch_and_mark_read(bob.id())
        .await
        .expect("fetch bob inbox");
    assert_eq!(bob_messages.len(), 2);
    assert_eq!(
        bob_messages[0],
        "Task 'Prepare the launch' has been assigned to bob by alice."
    );
    assert_eq!(
        bob_messages[1],
        "Task 'Prepare the launch' status changed from IN_PROGRESS to COMPLETED by alice."
    );

    // Carol never participated.
    let carol_messages = inbox
        .fetch_and_mark_read(carol.id())
        .await
        .expect("fetch carol inbox");
    assert!(carol_messages.is_empty());

    // Fetching drained every inbox.
    assert_eq!(inbox.unread_count(alice.id()).await.expect("count"), 0);
    assert_eq!(inbox.unread_count(bob.id()).await.expect("count"), 0);
    let repeat = inbox
        .fetch_and_mark_read(bob.id())
        .await
        .expect("repeat fetch");
    assert!(repeat.is_empty());
}

/// Removal silently revokes access; a later reassignment notifies afresh.
#[tokio::test(flavor = "multi_thread")]
async fn removal_is_silent_and_reassignment_notifies_again() {
    let (service, inbox, users) = build_stack();
    let alice = register(&users, "alice").await;
    let bob = register(&users, "bob").await;

    let task = service
        .create_task(alice.id(), CreateTaskRequest::new("Rotating duty", ""))
        .await
        .expect("create task");
    service
        .assign_users(task.id(), alice.id(), &[bob.id()])
        .await
        .expect("assign bob");
    inbox
        .fetch_and_mark_read(bob.id())
        .await
        .expect("drain bob inbox");

    service
        .remove_assignee(task.id(), alice.id(), bob.id())
        .await
        .expect("remove bob");

    // Removal produced no notification and revoked the detail view.
    assert_eq!(inbox.unread_count(bob.id()).await.expect("count"), 0);
    let denied = service.get_task_detail(task.id(), bob.id()).await;
    assert!(matches!(
        denied,
        Err(TaskServiceError::Access(TaskAccessError::Forbidden { .. }))
    ));

    let detail = service
        .assign_users(task.id(), alice.id(), &[bob.id()])
        .await
        .expect("reassign bob");
    assert_eq!(detail.assignees.len(), 1);

    let messages = inbox
        .fetch_and_mark_read(bob.id())
        .await
        .expect("fetch bob inbox");
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "Task 'Rotating duty' has been assigned to bob by alice."
    );
}

/// Deleting a task hides it from every view while delivered notifications
/// and drained inbox state survive.
#[tokio::test(flavor = "multi_thread")]
async fn deletion_hides_the_task_but_keeps_delivered_notifications() {
    let (service, inbox, users) = build_stack();
    let alice = register(&users, "alice").await;
    let bob = register(&users, "bob").await;

    let task = service
        .create_task(alice.id(), CreateTaskRequest::new("Short lived", ""))
        .await
        .expect("create task");
    service
        .assign_users(task.id(), alice.id(), &[bob.id()])
        .await
        .expect("assign bob");

    service
        .delete_task(task.id(), alice.id())
        .await
        .expect("delete task");

    let owner_view = service.get_task_detail(task.id(), alice.id()).await;
    assert!(matches!(
        owner_view,
        Err(TaskServiceError::Access(TaskAccessError::NotFound(_)))
    ));
    let listing = service
        .list_tasks_for(bob.id())
        .await
        .expect("list bob tasks");
    assert!(listing.assigned.is_empty());

    // The assignment notification outlives the task tombstone.
    let messages = inbox
        .fetch_and_mark_read(bob.id())
        .await
        .expect("fetch bob inbox");
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "Task 'Short lived' has been assigned to bob by alice."
    );
}
