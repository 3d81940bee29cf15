//! Adapter implementations of notification persistence ports.

pub mod memory;
pub mod postgres;
