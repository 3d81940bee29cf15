//! Verified identity value and authentication errors.

use crate::user::domain::{UserId, Username};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verified identity of an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    user_id: UserId,
    username: Username,
}

impl UserIdentity {
    /// Creates a verified identity.
    #[must_use]
    pub const fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the account username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}

/// Errors returned by identity providers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The presented credential is missing, malformed, or unknown.
    #[error("could not validate credentials")]
    Unauthenticated,
}
