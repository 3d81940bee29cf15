//! Service orchestration tests for account registration and resolution.

use std::sync::Arc;

use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::UserId,
    ports::UserRepositoryError,
    services::{UserDirectoryError, UserDirectoryService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestDirectory = UserDirectoryService<InMemoryUserRepository, DefaultClock>;

#[fixture]
fn directory() -> TestDirectory {
    UserDirectoryService::new(Arc::new(InMemoryUserRepository::new()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_persists_and_is_retrievable(directory: TestDirectory) {
    let registered = directory
        .register("alice")
        .await
        .expect("registration should succeed");

    let fetched = directory
        .find_by_username("alice")
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(registered));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_duplicate_username(directory: TestDirectory) {
    directory
        .register("carol")
        .await
        .expect("first registration should succeed");

    let result = directory.register("carol").await;
    assert!(matches!(
        result,
        Err(UserDirectoryError::Repository(
            UserRepositoryError::DuplicateUsername(ref name)
        )) if name == "carol"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_all_returns_every_requested_user(directory: TestDirectory) {
    let alice = directory.register("alice").await.expect("register alice");
    let bob = directory.register("bob").await.expect("register bob");

    let resolved = directory
        .resolve_all(&[alice.id(), bob.id()])
        .await
        .expect("resolution should succeed");

    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains(&alice));
    assert!(resolved.contains(&bob));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_all_lists_every_missing_identifier(directory: TestDirectory) {
    let alice = directory.register("alice").await.expect("register alice");
    let ghost_one = UserId::new();
    let ghost_two = UserId::new();

    let result = directory
        .resolve_all(&[alice.id(), ghost_one, ghost_two])
        .await;

    assert!(matches!(result, Err(UserDirectoryError::UsersNotFound(_))));
    let Err(UserDirectoryError::UsersNotFound(missing)) = result else {
        return;
    };
    assert_eq!(missing.len(), 2);
    assert!(missing.contains(&ghost_one));
    assert!(missing.contains(&ghost_two));
}
