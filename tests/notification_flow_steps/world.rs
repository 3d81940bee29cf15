//! Shared world state for notification flow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskpulse::notification::{
    adapters::memory::InMemoryNotificationRepository, services::NotificationInbox,
};
use taskpulse::task::{
    adapters::memory::{InMemoryTaskEventStore, InMemoryTaskRepository},
    domain::Task,
    services::TaskService,
};
use taskpulse::user::{adapters::memory::InMemoryUserRepository, domain::User};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryTaskEventStore,
    InMemoryNotificationRepository,
    DefaultClock,
>;

/// Inbox type used by the BDD world.
pub type TestInbox = NotificationInbox<InMemoryNotificationRepository, DefaultClock>;

/// Scenario world for notification flow behaviour tests.
pub struct NotificationFlowWorld {
    pub service: TestTaskService,
    pub inbox: TestInbox,
    pub users: Arc<InMemoryUserRepository>,
    pub known_users: HashMap<String, User>,
    pub task: Option<Task>,
    pub last_fetch: Option<Vec<String>>,
}

impl NotificationFlowWorld {
    /// Creates a world over a fresh in-memory composition.
    #[must_use]
    pub fn new() -> Self {
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

        Self {
            service,
            inbox,
            users,
            known_users: HashMap::new(),
            task: None,
            last_fetch: None,
        }
    }

    /// Looks up a registered scenario user by name.
    pub fn user(&self, name: &str) -> Result<&User, eyre::Report> {
        self.known_users
            .get(name)
            .ok_or_else(|| eyre::eyre!("unknown scenario user: {name}"))
    }

    /// Returns the scenario task.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for NotificationFlowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NotificationFlowWorld {
    NotificationFlowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
