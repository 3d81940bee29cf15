//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title exceeds {limit} characters (got {length})")]
    TitleTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Length of the rejected value.
        length: usize,
    },

    /// The task description exceeds the persisted column width.
    #[error("task description exceeds {limit} characters (got {length})")]
    DescriptionTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Length of the rejected value.
        length: usize,
    },

    /// Rendering a notification message template failed.
    #[error("failed to render {kind} message: {reason}")]
    MessageTemplate {
        /// Event kind whose template failed.
        kind: &'static str,
        /// Renderer failure description.
        reason: String,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task event kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task event kind: {0}")]
pub struct ParseTaskEventKindError(pub String);
