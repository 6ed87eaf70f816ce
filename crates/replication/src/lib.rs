//! Replication strategies and cluster metadata.
//!
//! This crate provides:
//! - Pluggable replication strategies that place natural replicas
//! - Keyspaces binding a name to a strategy
//! - Pending ranges tracked during bootstrap/decommission
//! - [`ClusterMetadata`], one consistent topology snapshot serving all
//!   routing lookups

pub mod error;
pub mod keyspace;
pub mod metadata;
pub mod pending;
pub mod strategy;

pub use error::ReplicationError;
pub use keyspace::Keyspace;
pub use metadata::ClusterMetadata;
pub use pending::PendingRanges;
pub use strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy};
