//! Identity provider boundary for Taskpulse.
//!
//! Authentication is a consumed collaborator: the core hands an opaque
//! bearer token to an [`ports::IdentityProvider`] and receives a verified
//! [`domain::UserIdentity`] back. Credential storage, hashing, and token
//! issuance all live on the far side of this boundary. Provider
//! configuration is injected at construction; there is no process-global
//! secret.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
