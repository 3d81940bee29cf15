//! Injected configuration for identity provider adapters.

use crate::auth::domain::UserIdentity;
use sha2::{Digest, Sha256};

/// Identity provider configuration, built once at process start and passed
/// to the provider's constructor.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    grants: Vec<TokenGrant>,
}

/// A single token-to-identity grant.
///
/// Only the SHA-256 digest of the bearer token is retained; the plaintext
/// token never outlives configuration loading.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    token_digest: [u8; 32],
    identity: UserIdentity,
}

impl TokenGrant {
    /// Creates a grant from a plaintext bearer token and its identity.
    #[must_use]
    pub fn new(token: &str, identity: UserIdentity) -> Self {
        Self {
            token_digest: digest_token(token),
            identity,
        }
    }

    /// Returns the SHA-256 digest of the granted token.
    #[must_use]
    pub const fn token_digest(&self) -> &[u8; 32] {
        &self.token_digest
    }

    /// Returns the identity the token resolves to.
    #[must_use]
    pub const fn identity(&self) -> &UserIdentity {
        &self.identity
    }
}

impl AuthConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self { grants: Vec::new() }
    }

    /// Adds a token grant.
    #[must_use]
    pub fn with_grant(mut self, token: &str, identity: UserIdentity) -> Self {
        self.grants.push(TokenGrant::new(token, identity));
        self
    }

    /// Returns the configured grants.
    #[must_use]
    pub fn grants(&self) -> &[TokenGrant] {
        &self.grants
    }
}

/// Computes the SHA-256 digest of a bearer token.
#[must_use]
pub fn digest_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}
