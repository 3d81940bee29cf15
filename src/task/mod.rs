//! Task lifecycle, access control, and the task event model.
//!
//! Tasks carry exactly one immutable owner and any number of active
//! assignees. Owner-only operations (field updates, deletion, assignee
//! management) and participant operations (detail view, status transition)
//! are gated by the access service. Every real mutation is recorded as an
//! immutable task event whose save triggers notification fan-out to the
//! other participants. The module follows hexagonal architecture:
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
