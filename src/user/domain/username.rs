//! Validated username scalar type.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed account username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Widest username accepted by the persisted schema.
    const MAX_LENGTH: usize = 255;

    /// Creates a validated username.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUsername`] when the trimmed value is
    /// empty, or [`UserDomainError::UsernameTooLong`] when it exceeds the
    /// schema-backed maximum.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(UserDomainError::EmptyUsername);
        }
        let length = normalized.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(UserDomainError::UsernameTooLong {
                limit: Self::MAX_LENGTH,
                length,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the username as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
