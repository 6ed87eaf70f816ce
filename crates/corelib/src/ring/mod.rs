//! Ring implementation.
//!
//! The ring maps tokens to the endpoints that own them. Lookups are served
//! from immutable [`RingSnapshot`]s so one routing decision always sees a
//! single topology epoch.

pub mod range;
pub mod ring;
pub mod snapshot;

pub use range::TokenRange;
pub use ring::{HashRing, RingBuilder};
pub use snapshot::RingSnapshot;

/// Alias for the main ring type.
pub type Ring = HashRing;
