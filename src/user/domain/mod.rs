//! Domain model for user accounts.
//!
//! The user domain models account identity and validated usernames while
//! keeping credential handling outside of the domain boundary.

mod error;
mod ids;
mod user;
mod username;

pub use error::UserDomainError;
pub use ids::UserId;
pub use user::{PersistedUserData, User};
pub use username::Username;
