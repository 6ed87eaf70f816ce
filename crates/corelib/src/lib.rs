//! Core library for ring-based replica placement.
//!
//! This crate provides the fundamental abstractions shared by the workspace:
//! - Token types and the Murmur3 partitioner
//! - Endpoints, nodes and virtual nodes
//! - Ring snapshots and token ranges
//! - The endpoint snitch (endpoint → datacenter/rack)
//! - Collaborator traits consumed by view routing

pub mod error;
pub mod network;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod snitch;
pub mod token;
pub mod topology;
pub mod vnode;

pub use error::{Error, Result};
pub use network::Endpoint;
pub use node::Node;
pub use partitioner::Partitioner;
pub use ring::{HashRing, RingBuilder, RingSnapshot, TokenRange};
pub use snitch::{Location, PropertySnitch};
pub use token::Token;
pub use topology::{DatacenterResolver, PendingReplicaProvider, ReplicaSetProvider};
pub use vnode::VirtualNode;
