//! Taskpulse: collaborative task-management core.
//!
//! This crate provides the domain core of a task-management backend: users
//! own and are assigned to tasks, task mutations are recorded as immutable
//! task events, and each saved event fans out as unread notifications to the
//! remaining task participants.
//!
//! # Architecture
//!
//! Taskpulse follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`auth`]: Identity provider boundary yielding verified user identities
//! - [`user`]: User accounts and the directory service
//! - [`task`]: Access control, task lifecycle, and the task event model
//! - [`notification`]: Event fan-out engine and the notification inbox

pub mod auth;
pub mod notification;
pub mod task;
pub mod user;
