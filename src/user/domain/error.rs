//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing domain user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the persisted column width.
    #[error("username exceeds {limit} characters (got {length})")]
    UsernameTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Length of the rejected value.
        length: usize,
    },
}
