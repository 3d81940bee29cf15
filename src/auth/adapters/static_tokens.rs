//! Static token-table identity provider.
//!
//! Resolves bearer tokens against a fixed table of SHA-256 digests taken
//! from injected [`AuthConfig`]. Used by tests and local development in
//! place of a remote token verifier.

use crate::auth::{
    config::{AuthConfig, digest_token},
    domain::{AuthError, UserIdentity},
    ports::IdentityProvider,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Identity provider backed by a static token digest table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    identities: HashMap<[u8; 32], UserIdentity>,
}

impl StaticTokenProvider {
    /// Builds a provider from injected configuration.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        let identities = config
            .grants()
            .iter()
            .map(|grant| (*grant.token_digest(), grant.identity().clone()))
            .collect();
        Self { identities }
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenProvider {
    async fn authenticate(&self, token: &str) -> Result<UserIdentity, AuthError> {
        self.identities
            .get(&digest_token(token))
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}
