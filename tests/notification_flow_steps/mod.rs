//! Step definitions for notification flow BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
