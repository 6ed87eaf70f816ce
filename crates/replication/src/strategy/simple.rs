//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring (clockwise from the primary).
//! This is the simplest replication strategy and works well for:
//!
//! - Small clusters (< 10 nodes)
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! 1. Start at the first ring token at or after the key's token
//! 2. Walk clockwise, collecting each owner the first time it appears
//! 3. Stop after N distinct owners (primary first)
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement
//! - May place replicas on nodes in the same failure domain

use std::collections::HashSet;

use crate::strategy::ReplicationStrategy;
use corelib::token::Murmur3Token;
use corelib::{DatacenterResolver, Endpoint, RingSnapshot};

/// Simple replication strategy: N replicas placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use corelib::token::Murmur3Token;
/// use corelib::{Node, PropertySnitch, RingBuilder};
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let a = "10.0.0.1".parse().unwrap();
/// let b = "10.0.0.2".parse().unwrap();
/// let ring = RingBuilder::new()
///     .add_node_with_tokens(Node::new(a, "a"), [Murmur3Token(100)])
///     .add_node_with_tokens(Node::new(b, "b"), [Murmur3Token(200)])
///     .snapshot();
///
/// let strategy = SimpleStrategy::new(2);
/// let replicas = strategy.natural_endpoints(&ring, &PropertySnitch::new(), &Murmur3Token(150));
/// assert_eq!(replicas, vec![b, a]);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    /// Create a new simple strategy with the given replication factor.
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }
}

impl Default for SimpleStrategy {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn natural_endpoints(
        &self,
        ring: &RingSnapshot,
        _snitch: &dyn DatacenterResolver,
        token: &Murmur3Token,
    ) -> Vec<Endpoint> {
        let mut replicas = Vec::with_capacity(self.replication_factor);
        if self.replication_factor == 0 {
            return replicas;
        }

        let mut seen_nodes = HashSet::new();
        for endpoint in ring.walk_from(token) {
            // Skip if we've already seen this node
            if !seen_nodes.insert(endpoint) {
                continue;
            }
            replicas.push(endpoint);

            if replicas.len() >= self.replication_factor {
                break;
            }
        }

        replicas
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
