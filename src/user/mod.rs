//! User accounts for Taskpulse.
//!
//! Users own tasks, are assigned to tasks, and receive notifications about
//! task activity. This module covers account registration and user lookup;
//! credential verification lives behind the [`crate::auth`] boundary. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
