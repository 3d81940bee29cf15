//! Notification fan-out and inbox for Taskpulse.
//!
//! Every saved task event fans out as one unread notification per task
//! participant other than the actor. Delivery is poll-based: the inbox
//! returns a user's unread messages and marks them read in the same
//! operation. The module follows hexagonal architecture:
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
