//! Application services for user account management.

mod directory;

pub use directory::{UserDirectoryError, UserDirectoryResult, UserDirectoryService};
