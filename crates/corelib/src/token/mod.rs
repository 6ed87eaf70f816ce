//! Token abstraction module.
//!
//! Tokens represent positions on the ring and must be comparable,
//! hashable, and thread-safe.

pub mod murmur3;
pub mod traits;

pub use murmur3::Murmur3Token;
pub use traits::Token;
