//! Adapter implementations of user persistence ports.

pub mod memory;
pub mod postgres;
