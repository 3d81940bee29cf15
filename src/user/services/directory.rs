//! Service layer for account registration and user resolution.

use crate::user::{
    domain::{User, UserDomainError, UserId, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// One or more requested users do not exist.
    #[error("users not found: {}", format_ids(.0))]
    UsersNotFound(Vec<UserId>),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new account with the given username.
    ///
    /// The caller is expected to have provisioned credentials through the
    /// identity provider; the directory only records the account identity.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] when the username fails
    /// validation, or [`UserDirectoryError::Repository`] when the username
    /// is taken or persistence fails.
    pub async fn register(&self, username: impl Into<String>) -> UserDirectoryResult<User> {
        let username = Username::new(username)?;
        let user = User::new(username, &*self.clock);
        self.repository.store(&user).await?;
        Ok(user)
    }

    /// Finds an account by exact username.
    ///
    /// Returns `Ok(None)` when no account carries the username.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn find_by_username(&self, username: &str) -> UserDirectoryResult<Option<User>> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Resolves every given identifier to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::UsersNotFound`] listing each missing
    /// identifier when any lookup comes back empty. No partial result is
    /// returned.
    pub async fn resolve_all(&self, ids: &[UserId]) -> UserDirectoryResult<Vec<User>> {
        let found = self.repository.find_many(ids).await?;
        let found_ids: HashSet<UserId> = found.iter().map(User::id).collect();
        let mut missing: Vec<UserId> = ids
            .iter()
            .copied()
            .filter(|id| !found_ids.contains(id))
            .collect();
        if missing.is_empty() {
            Ok(found)
        } else {
            missing.sort_unstable();
            missing.dedup();
            Err(UserDirectoryError::UsersNotFound(missing))
        }
    }
}

fn format_ids(ids: &[UserId]) -> String {
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    rendered.join(", ")
}
