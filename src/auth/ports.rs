//! Port contract for identity verification.

use crate::auth::domain::{AuthError, UserIdentity};
use async_trait::async_trait;

/// Identity verification contract.
///
/// Implementations translate an opaque bearer token into a verified
/// identity. The core never inspects tokens itself.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticates an opaque bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] when the token is unknown or
    /// invalid.
    async fn authenticate(&self, token: &str) -> Result<UserIdentity, AuthError>;
}
