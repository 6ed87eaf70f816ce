//! Partitioner abstraction.
//!
//! Partitioners are responsible for converting partition keys into tokens
//! that can be placed on the ring.

pub mod murmur3;
pub mod traits;

pub use murmur3::Murmur3Partitioner;
pub use traits::Partitioner;
