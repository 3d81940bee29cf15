//! Adapter implementations of the identity provider port.

mod static_tokens;

pub use static_tokens::StaticTokenProvider;
