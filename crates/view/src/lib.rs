//! Materialized-view write routing.
//!
//! When a base replica applies a write, it must push the matching view
//! mutation to exactly one view replica. This crate computes that replica:
//! local base replicas and local view replicas are paired by rank, after
//! dropping endpoints that replicate both tokens, so every view replica
//! receives exactly one write per base replica.

pub mod error;
pub mod pairing;
pub mod resolver;

pub use error::ViewError;
pub use pairing::LocalReplicas;
pub use resolver::{ViewEndpointResolver, ViewTarget};
